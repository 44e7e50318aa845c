//! Content panes swapped into the shell.

use leptos::prelude::*;

use crate::db::models::Invoice;
use crate::ui::components::{
    Badge, BadgeVariant, Button, Card, CardContent, CardHeader, FileTextIcon, UploadIcon,
};

/// Shown at `/`.
#[component]
pub fn WelcomePage() -> impl IntoView {
    view! {
        <div class="space-y-2">
            <h2 class="text-2xl font-bold">"Welcome"</h2>
            <p class="text-textMuted">"Use the navigation above to upload your company logo or browse invoices."</p>
        </div>
    }
}

/// Logo upload form. Posts a single `file` field to `/upload/logo`.
#[component]
pub fn LogoPage() -> impl IntoView {
    view! {
        <Card>
            <CardHeader>
                <h2 class="text-xl font-semibold">"Upload Logo"</h2>
            </CardHeader>
            <CardContent class="space-y-4">
                <p class="text-sm text-textMuted">
                    "The logo is stored against your account and used on exported documents."
                </p>
                <form
                    id="logo-upload"
                    method="post"
                    action="/upload/logo"
                    enctype="multipart/form-data"
                    class="flex items-center gap-4"
                >
                    <input type="file" name="file" accept="image/*" required=true/>
                    <Button button_type="submit">
                        <UploadIcon/>
                        "Upload"
                    </Button>
                </form>
            </CardContent>
        </Card>
    }
}

/// Invoice listing with per-row export links.
#[component]
pub fn InvoicesPage(invoices: Vec<Invoice>) -> impl IntoView {
    let count = format!("{} total", invoices.len());

    let body = if invoices.is_empty() {
        view! { <p id="invoices-empty" class="text-sm text-textMuted">"No invoices yet."</p> }
            .into_any()
    } else {
        let rows = invoices.into_iter().map(invoice_row).collect_view();
        view! {
            <table id="invoices-table" class="w-full text-sm">
                <thead>
                    <tr>
                        <th>"Invoice"</th>
                        <th>"Customer"</th>
                        <th>"Date"</th>
                        <th>"Total"</th>
                        <th>"Balance due"</th>
                        <th>"Export"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        }
        .into_any()
    };

    view! {
        <Card>
            <CardHeader>
                <h2 class="text-xl font-semibold">"Invoices"</h2>
                <Badge>{count}</Badge>
            </CardHeader>
            <CardContent>{body}</CardContent>
        </Card>
    }
}

fn invoice_row(invoice: Invoice) -> impl IntoView {
    let id = invoice.invoice_id;
    let status = if invoice.balance_due > 0.0 {
        view! { <Badge variant=BadgeVariant::Warning>{money(invoice.balance_due)}</Badge> }
            .into_any()
    } else {
        view! { <Badge variant=BadgeVariant::Success>"Paid"</Badge> }.into_any()
    };

    view! {
        <tr>
            <td class="flex items-center gap-2">
                <FileTextIcon/>
                {format!("#{id}")}
            </td>
            <td>{invoice.customer_id.to_string()}</td>
            <td>{invoice.date}</td>
            <td>{money(invoice.total)}</td>
            <td>{status}</td>
            <td class="space-x-2">
                <a href=format!("/export/invoice/{id}?format=csv")>"CSV"</a>
                <a href=format!("/export/invoice/{id}?format=json")>"JSON"</a>
            </td>
        </tr>
    }
}

fn money(amount: f64) -> String {
    format!("{amount:.2}")
}
