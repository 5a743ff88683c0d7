//! `analyze` and `revenue`: the attribution join and the raw ad report.

use chrono::NaiveDate;
use smsdash_adsense::RevenueReporter;
use smsdash_core::{DailyMetric, MatchedPage, RevenueAnalysis, RevenueReport, SmsMessage};

/// Print the attribution table for the day with id `id`.
///
/// # Errors
///
/// Returns an error if the day does not exist or a query fails. Report
/// failures do not error; they print a zeroed analysis with a note.
pub(crate) async fn run_analyze(
    pool: &sqlx::PgPool,
    reporter: &RevenueReporter,
    id: i64,
) -> anyhow::Result<()> {
    let Some(row) = smsdash_db::get_daily_metric(pool, id).await? else {
        anyhow::bail!("daily metric {id} not found");
    };
    let metric = DailyMetric::from(row);

    let messages: Vec<SmsMessage> = smsdash_db::list_messages_by_num_sent(pool, metric.id)
        .await?
        .into_iter()
        .map(SmsMessage::from)
        .collect();
    let report = reporter.report_for(metric.date).await;
    let analysis = smsdash_core::analyze(&messages, &report);

    print_analysis(&metric, &analysis);
    Ok(())
}

/// Print the ad revenue report for `date`.
pub(crate) async fn run_revenue(reporter: &RevenueReporter, date: NaiveDate) {
    let report = reporter.report_for(date).await;
    print_report(&report);
}

fn print_analysis(metric: &DailyMetric, analysis: &RevenueAnalysis) {
    println!(
        "{} (id {}): entered revenue {}, sms cost {}",
        metric.date, metric.id, metric.revenue, metric.sms_cost
    );
    if let Some(note) = &analysis.note {
        println!("note: {note}");
    }
    println!("{} link(s) found in messages", analysis.sms_links.len());
    println!();

    if analysis.pages.is_empty() {
        println!("no page rows in the report");
    } else {
        println!(
            "{:<48}{:>10}{:>8}{:>8}{:>10}  {}",
            "PAGE", "EARNINGS", "VIEWS", "CLICKS", "RPM", "CAMPAIGN"
        );
        for page in &analysis.pages {
            println!("{}", page_line(page));
        }
    }

    let s = &analysis.summary;
    println!();
    println!(
        "total {}  attributed {} ({}%)  unattributed {}",
        s.total_revenue, s.matched_revenue, s.attributed_percent, s.unmatched_revenue
    );
    println!(
        "{} page(s), {} view(s), {} click(s)",
        s.total_pages, s.total_page_views, s.total_clicks
    );
}

fn page_line(page: &MatchedPage) -> String {
    let campaign = page.sms_message.as_ref().map_or_else(
        || "\u{2014}".to_owned(),
        |m| format!("#{} {}", m.id, super::truncate(&m.content, 30)),
    );
    format!(
        "{:<48}{:>10}{:>8}{:>8}{:>10}  {}",
        super::truncate(&page.page_url, 44),
        page.row.earnings.to_string(),
        page.row.page_views,
        page.row.clicks,
        page.revenue_per_mille.round_dp(2).to_string(),
        campaign,
    )
}

fn print_report(report: &RevenueReport) {
    println!("{}: revenue {}", report.date, report.revenue);
    if let Some(note) = &report.note {
        println!("note: {note}");
    }
    for domain in &report.breakdown {
        println!("  {:<40}{:>10}", domain.domain, domain.earnings.to_string());
    }
    println!(
        "{} page row(s), {} view(s), {} click(s)",
        report.page_breakdown.len(),
        report.summary.total_page_views,
        report.summary.total_clicks
    );
}
