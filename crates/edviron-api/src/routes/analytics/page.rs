//! Analytics page rendering
//!
//! - page_analytics: Summary cards, status cards, charts and recent rows
//! - chart_card: One chart with its legend, or a notice when it cannot render

use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use edviron_core::{AnalyticsReport, CoreError, CountEntry};
use edviron_utils::{escape_html, format_number};
use rust_decimal::prelude::ToPrimitive;

use super::charts;
use crate::session::{dark_mode, redirect, require_user};
use crate::views::{self, alert, empty_state, AlertKind};
use crate::AppState;

pub const ANALYTICS_FAILED: &str = "Failed to load analytics.";

pub async fn page_analytics(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
) -> Response {
    let (session, _user) = match require_user(&state, &headers).await {
        Ok(found) => found,
        Err(redirect) => return redirect,
    };

    let body = match state.dashboard.analytics(&session).await {
        Ok(report) => render_report(&state, &report, dark_mode(&headers, state.config.theme.default_dark)),
        Err(CoreError::Unauthorized) => return redirect(&headers, "/login"),
        Err(error) => {
            log::warn!("Analytics failed: {}", error);
            alert(AlertKind::Error, error.user_message().unwrap_or(ANALYTICS_FAILED))
        }
    };

    let inner_content = format!(
        "{}{}",
        views::page_header("Analytics", "Status breakdown, payment modes and monthly volume."),
        body
    );
    Html(crate::page_response(&state, &headers, "Analytics", "/analytics", &inner_content)).into_response()
}

fn render_report(state: &AppState, report: &AnalyticsReport, dark: bool) -> String {
    let amount = |value| views::amount(&state.config, value);
    let stat = |label: &str, value: String, colors: &str| {
        format!(
            "<div class='p-4 rounded-lg border {}'><p class='text-sm'>{}</p><p class='text-2xl font-bold'>{}</p></div>",
            colors, label, value
        )
    };

    let summary = &report.summary;
    let summary_cards = [
        stat("Total Transaction Amount", amount(summary.total_transaction_amount), "bg-indigo-50 border-indigo-200 dark:bg-gray-800 dark:border-indigo-700"),
        stat("Total Order Amount", amount(summary.total_order_amount), "bg-sky-50 border-sky-200 dark:bg-gray-800 dark:border-sky-700"),
        stat("Transactions", format_number(summary.total_transactions), "bg-purple-50 border-purple-200 dark:bg-gray-800 dark:border-purple-700"),
        stat("Schools", format_number(summary.total_schools), "bg-emerald-50 border-emerald-200 dark:bg-gray-800 dark:border-emerald-700"),
    ]
    .concat();

    let status = &report.status_summary;
    let status_cards = [
        stat("Success", format_number(status.success), "bg-green-50 border-green-200 text-green-700 dark:bg-gray-800 dark:text-green-400"),
        stat("Pending", format_number(status.pending), "bg-yellow-50 border-yellow-200 text-yellow-700 dark:bg-gray-800 dark:text-yellow-400"),
        stat("Failed", format_number(status.failed), "bg-red-50 border-red-200 text-red-700 dark:bg-gray-800 dark:text-red-400"),
    ]
    .concat();

    let counts = |entries: &[CountEntry]| -> (Vec<f64>, Vec<(String, String)>) {
        let values = entries.iter().map(|e| e.count as f64).collect();
        let legend = entries.iter().map(|e| (e.label.clone(), format_number(e.count))).collect();
        (values, legend)
    };

    let (values, legend) = counts(&status.entries());
    let status_chart = chart_card("Status Summary", charts::pie_chart(&values, dark), &legend, status.total() == 0);

    let (values, legend) = counts(&report.status_breakdown);
    let breakdown_chart = chart_card("Status Breakdown", charts::pie_chart(&values, dark), &legend, values.is_empty());

    let (values, legend) = counts(&report.payment_modes);
    let modes_chart = chart_card("Payment Modes", charts::bar_chart(&values, dark), &legend, values.is_empty());

    let (values, legend) = counts(&report.pending_by_school);
    let pending_chart = chart_card("Pending by School", charts::pie_chart(&values, dark), &legend, values.is_empty());

    let daily: Vec<f64> = report.time_series.iter().map(|d| d.count as f64).collect();
    let daily_range = match (report.time_series.first(), report.time_series.last()) {
        (Some(first), Some(last)) => vec![(format!("{} to {}", first.date, last.date), format_number(daily.len()) + " days")],
        _ => Vec::new(),
    };
    let time_chart = chart_card("Transactions Over Time", charts::line_chart(&daily, dark), &daily_range, daily.is_empty());

    let monthly: Vec<f64> = report
        .monthly_volume
        .iter()
        .map(|m| m.amount.to_f64().unwrap_or(0.0))
        .collect();
    let month_labels: String = report
        .monthly_volume
        .iter()
        .map(|m| format!("<span title='{}'>{}</span>", escape_html(&amount(m.amount)), escape_html(&m.month)))
        .collect();
    let volume_chart = format!(
        "{}<div class='grid grid-cols-12 text-xs text-center text-gray-500 dark:text-gray-400 -mt-2'>{}</div>",
        chart_card(
            &format!("Monthly Volume ({})", escape_html(&report.period)),
            charts::line_chart(&monthly, dark),
            &[],
            monthly.is_empty()
        ),
        month_labels
    );

    format!(
        r#"<div class='grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4 mb-6'>{}</div>
<div class='grid grid-cols-1 md:grid-cols-3 gap-4 mb-6'>{}</div>
<div class='grid grid-cols-1 lg:grid-cols-2 gap-6'>
    {}{}{}{}{}
    <div>{}</div>
</div>
{}"#,
        summary_cards,
        status_cards,
        status_chart,
        breakdown_chart,
        modes_chart,
        pending_chart,
        time_chart,
        volume_chart,
        recent_table(state, report)
    )
}

/// Chart with its legend; failures and empty data degrade to a notice
fn chart_card(title: &str, svg: Result<String, String>, legend: &[(String, String)], empty: bool) -> String {
    let body = if empty {
        empty_state("No data")
    } else {
        match svg {
            Ok(svg) => format!(
                "<div class='w-full overflow-x-auto'>{}</div>{}",
                svg,
                if legend.is_empty() { String::new() } else { charts::legend(legend) }
            ),
            Err(error) => {
                log::warn!("Chart '{}' failed to render: {}", title, error);
                alert(AlertKind::Info, "Chart unavailable")
            }
        }
    };
    views::card(&format!("<h3 class='text-lg font-semibold mb-4'>{}</h3>{}", title, body))
}

fn recent_table(state: &AppState, report: &AnalyticsReport) -> String {
    if report.recent.is_empty() {
        return views::card(&format!(
            "<h3 class='text-lg font-semibold mb-4'>Recent Transactions</h3>{}",
            empty_state(views::EMPTY_TRANSACTIONS)
        ));
    }
    let rows: String = report
        .recent
        .iter()
        .map(|r| {
            format!(
                "<tr><td class='px-4 py-3'>{}</td><td class='px-4 py-3'>{}</td><td class='px-4 py-3'>{}</td></tr>",
                escape_html(&r.date),
                escape_html(&r.school_id),
                views::amount(&state.config, r.amount)
            )
        })
        .collect();
    views::card(&format!(
        "<h3 class='text-lg font-semibold mb-4'>Recent Transactions</h3>{}",
        views::table(&["Date &amp; Time", "School ID", "Amount"], &rows)
    ))
}
