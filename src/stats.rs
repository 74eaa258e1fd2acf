//! Read-only summarization and filtering over invoice headers.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::{Invoice, InvoiceStatus, ParseStatusError};

/// Dashboard roll-up over a set of invoice headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub count: usize,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub unpaid_amount: Decimal,
}

/// Status predicate for invoice listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(InvoiceStatus),
}

impl FromStr for StatusFilter {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

/// Count and sum a set of invoices. The unpaid amount is derived by
/// subtraction, so paid + unpaid equals the grand total exactly.
pub fn summarize(invoices: &[Invoice]) -> DashboardSummary {
    let total_amount: Decimal = invoices.iter().map(|invoice| invoice.total).sum();
    let paid_amount: Decimal = invoices
        .iter()
        .filter(|invoice| invoice.status == InvoiceStatus::Paid)
        .map(|invoice| invoice.total)
        .sum();

    DashboardSummary {
        count: invoices.len(),
        total_amount,
        paid_amount,
        unpaid_amount: total_amount - paid_amount,
    }
}

/// Select the invoices matching a search term and a status filter. The term
/// matches the invoice id or the client id as text, case-insensitively; an
/// empty term matches everything. Both predicates must hold.
pub fn filter_invoices(invoices: &[Invoice], search: &str, status: StatusFilter) -> Vec<Invoice> {
    let term = search.trim().to_ascii_lowercase();

    invoices
        .iter()
        .filter(|invoice| matches_search(invoice, &term) && matches_status(invoice, status))
        .cloned()
        .collect()
}

fn matches_search(invoice: &Invoice, term: &str) -> bool {
    term.is_empty()
        || invoice.id.to_string().contains(term)
        || invoice.client_id.to_string().contains(term)
}

fn matches_status(invoice: &Invoice, status: StatusFilter) -> bool {
    match status {
        StatusFilter::All => true,
        StatusFilter::Only(wanted) => invoice.status == wanted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn invoice(id: i32, client_id: i32, total: Decimal, status: InvoiceStatus) -> Invoice {
        Invoice {
            id,
            client_id,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            total,
            tax: Decimal::ZERO,
            status,
        }
    }

    fn sample() -> Vec<Invoice> {
        vec![
            invoice(1, 7, Decimal::new(12500, 2), InvoiceStatus::Unpaid),
            invoice(2, 7, Decimal::new(4999, 2), InvoiceStatus::Paid),
            invoice(3, 12, Decimal::new(30001, 2), InvoiceStatus::Paid),
        ]
    }

    #[test]
    fn summary_amounts_reconcile() {
        let summary = summarize(&sample());

        assert_eq!(summary.count, 3);
        assert_eq!(summary.total_amount, Decimal::new(47500, 2));
        assert_eq!(summary.paid_amount, Decimal::new(35000, 2));
        assert_eq!(
            summary.paid_amount + summary.unpaid_amount,
            summary.total_amount
        );
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        let summary = summarize(&[]);

        assert_eq!(summary.count, 0);
        assert_eq!(summary.total_amount, Decimal::ZERO);
        assert_eq!(summary.unpaid_amount, Decimal::ZERO);
    }

    #[test]
    fn empty_search_matches_everything() {
        let filtered = filter_invoices(&sample(), "", StatusFilter::All);
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn search_matches_invoice_or_client_id() {
        let invoices = sample();

        let by_invoice_id = filter_invoices(&invoices, "3", StatusFilter::All);
        assert_eq!(by_invoice_id.len(), 1);
        assert_eq!(by_invoice_id[0].id, 3);

        let by_client_id = filter_invoices(&invoices, "7", StatusFilter::All);
        assert_eq!(by_client_id.len(), 2);
    }

    #[test]
    fn status_filter_parses_any_casing() {
        for variant in ["paid", "PAID", "Paid"] {
            let filter: StatusFilter = variant.parse().unwrap();
            let filtered = filter_invoices(&sample(), "", filter);
            assert_eq!(filtered.len(), 2);
            assert!(
                filtered
                    .iter()
                    .all(|invoice| invoice.status == InvoiceStatus::Paid)
            );
        }
    }

    #[test]
    fn unknown_status_filter_is_rejected() {
        assert!("overdue".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn filtering_is_idempotent() {
        let invoices = sample();
        let filter: StatusFilter = "unpaid".parse().unwrap();

        let once = filter_invoices(&invoices, "7", filter);
        let twice = filter_invoices(&once, "7", filter);

        assert_eq!(once.len(), twice.len());
        assert_eq!(
            once.iter().map(|i| i.id).collect::<Vec<_>>(),
            twice.iter().map(|i| i.id).collect::<Vec<_>>()
        );
    }
}
