//! HTML pieces shared by several pages

use edviron_config::Config;
use edviron_core::{Transaction, TransactionStatus};
use edviron_utils::{escape_html, format_amount};
use rust_decimal::Decimal;

pub const EMPTY_TRANSACTIONS: &str = "No Transactions Found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Success,
    Info,
}

/// Inline alert box; `message` is escaped
pub fn alert(kind: AlertKind, message: &str) -> String {
    let class = match kind {
        AlertKind::Error => "bg-red-50 border-red-200 text-red-700 dark:bg-red-900 dark:border-red-700 dark:text-red-100",
        AlertKind::Success => {
            "bg-green-50 border-green-200 text-green-700 dark:bg-green-900 dark:border-green-700 dark:text-green-100"
        }
        AlertKind::Info => "bg-blue-50 border-blue-200 text-blue-700 dark:bg-blue-900 dark:border-blue-700 dark:text-blue-100",
    };
    format!(
        "<div role='alert' class='px-4 py-3 mb-4 border rounded-lg {}'>{}</div>",
        class,
        escape_html(message)
    )
}

/// Placeholder shown instead of an empty table
pub fn empty_state(message: &str) -> String {
    format!(
        "<div class='text-center py-12 text-gray-500 dark:text-gray-400'><p>{}</p></div>",
        escape_html(message)
    )
}

pub fn amount(config: &Config, value: Decimal) -> String {
    format_amount(value, &config.currency.symbol, config.currency.decimal_places)
}

pub fn status_class(status: &TransactionStatus) -> &'static str {
    match status {
        TransactionStatus::Success => "text-green-600 dark:text-green-400",
        TransactionStatus::Pending => "text-yellow-600 dark:text-yellow-400",
        TransactionStatus::Failed => "text-red-600 dark:text-red-400",
        TransactionStatus::Other(_) => "text-gray-500",
    }
}

pub fn status_cell(status: &TransactionStatus) -> String {
    format!(
        "<td class='px-4 py-3 font-semibold {}'>{}</td>",
        status_class(status),
        escape_html(&status.label())
    )
}

/// Wrap rows in the standard table chrome
pub fn table(headers: &[&str], rows: &str) -> String {
    let head: String = headers
        .iter()
        .map(|h| format!("<th class='px-4 py-3 text-left'>{}</th>", h))
        .collect();
    format!(
        r#"<div class='overflow-x-auto'>
    <table class='min-w-full border rounded-lg text-sm bg-white dark:bg-gray-800 dark:border-gray-700'>
        <thead class='bg-gray-50 text-gray-700 font-semibold dark:bg-gray-700 dark:text-gray-100'><tr>{}</tr></thead>
        <tbody class='divide-y divide-gray-200 dark:divide-gray-700'>{}</tbody>
    </table>
</div>"#,
        head, rows
    )
}

/// Plain transaction table used by the by-school and status pages
pub fn transaction_table(config: &Config, transactions: &[Transaction]) -> String {
    let rows: String = transactions
        .iter()
        .map(|tx| {
            format!(
                "<tr class='hover:bg-gray-50 dark:hover:bg-gray-700'>\
                 <td class='px-4 py-3 font-mono text-xs'>{}</td>\
                 <td class='px-4 py-3'>{}</td>\
                 <td class='px-4 py-3'>{}</td>\
                 <td class='px-4 py-3'>{}</td>\
                 <td class='px-4 py-3'>{}</td>\
                 {}\
                 <td class='px-4 py-3'>{}</td>\
                 <td class='px-4 py-3'>{}</td></tr>",
                escape_html(&tx.collect_id),
                escape_html(&tx.school_id),
                escape_html(&tx.gateway_name),
                amount(config, tx.order_amount),
                amount(config, tx.transaction_amount),
                status_cell(&tx.status),
                escape_html(&tx.datetime_label()),
                escape_html(&tx.custom_order_id),
            )
        })
        .collect();

    table(
        &[
            "Collect ID",
            "School ID",
            "Gateway",
            "Order Amount",
            "Transaction Amount",
            "Status",
            "Payment Time",
            "Custom Order ID",
        ],
        &rows,
    )
}

pub fn card(content: &str) -> String {
    format!(
        "<div class='bg-white dark:bg-gray-800 rounded-xl shadow-sm p-6 mb-6'>{}</div>",
        content
    )
}

pub fn page_header(title: &str, subtitle: &str) -> String {
    format!(
        "<div class='mb-6'><h2 class='text-2xl font-bold'>{}</h2><p class='text-gray-500 dark:text-gray-400'>{}</p></div>",
        title, subtitle
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use edviron_core::testing::transaction;

    #[test]
    fn test_alert_escapes() {
        let html = alert(AlertKind::Error, "<script>x</script>");
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_transaction_table_rows() {
        let config = Config::default();
        let rows = vec![transaction("c1", "s1", "SUCCESS", "2025-04-02T10:00:00Z", "1250")];
        let html = transaction_table(&config, &rows);
        assert!(html.contains("ORD-c1"));
        assert!(html.contains("₹1,250.00"));
        assert!(html.contains("Success"));
    }
}
