//! Filter → sort → paginate pipeline behind the transaction and redemption
//! tables. Stage order is fixed; the sort key is date descending with id
//! ascending as the stable tie-break.

use common::format::{format_currency_plain, format_date};
use common::types::{Transaction, TransactionKind, TransactionStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Kind(TransactionKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Status(TransactionStatus),
}

/// One slice of a filtered, sorted list, 1-based page numbering.
#[derive(Debug)]
pub struct Page<'a> {
    pub items: Vec<&'a Transaction>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slice `[(page-1)·n, page·n)` out of `items`. A page beyond the end (after
/// a filter shrank the list) clamps to the last page; an empty list yields
/// one empty page.
pub fn paginate<'a>(items: &[&'a Transaction], page: usize, per_page: usize) -> Page<'a> {
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);
    let items = if start < total_items {
        items[start..end].to_vec()
    } else {
        Vec::new()
    };
    Page {
        items,
        page,
        total_pages,
        total_items,
    }
}

fn sort_newest_first(items: &mut [&Transaction]) {
    items.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
}

/// True when `term` (already lowercased) matches any of the strings the table
/// renders for this transaction: formatted date, cash amount, gram amount,
/// kind label, status.
fn matches_search(tx: &Transaction, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    if format_date(tx.date).to_lowercase().contains(term) {
        return true;
    }
    if let Some(lkr) = tx.amount_lkr() {
        if format_currency_plain(lkr).to_lowercase().contains(term) || lkr.to_string().contains(term)
        {
            return true;
        }
    }
    if let Some(grams) = tx.amount_grams() {
        if grams.to_string().contains(term) {
            return true;
        }
    }
    if let Some(kind) = tx.kind() {
        if kind.label().contains(term) {
            return true;
        }
    }
    tx.status.as_str().contains(term)
}

/// UI selection state for the transaction table. Setters reset the page so a
/// stale out-of-range page is never shown.
#[derive(Debug, Clone, Default)]
pub struct TransactionListState {
    pub filter: KindFilter,
    pub search: String,
    pub page: usize,
}

impl TransactionListState {
    pub fn new() -> Self {
        Self {
            filter: KindFilter::All,
            search: String::new(),
            page: 1,
        }
    }

    pub fn set_filter(&mut self, filter: KindFilter) {
        self.filter = filter;
        self.page = 1;
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn apply<'a>(&self, transactions: &'a [Transaction], per_page: usize) -> Page<'a> {
        let term = self.search.trim().to_lowercase();
        let mut filtered: Vec<&Transaction> = transactions
            .iter()
            .filter(|tx| match self.filter {
                KindFilter::All => true,
                KindFilter::Kind(kind) => tx.kind() == Some(kind),
            })
            .filter(|tx| matches_search(tx, &term))
            .collect();
        sort_newest_first(&mut filtered);
        paginate(&filtered, self.page.max(1), per_page)
    }
}

/// UI selection state for the redemption-history table: redemption
/// transactions only, optionally narrowed to one status.
#[derive(Debug, Clone, Default)]
pub struct RedemptionListState {
    pub status: StatusFilter,
    pub page: usize,
}

impl RedemptionListState {
    pub fn new() -> Self {
        Self {
            status: StatusFilter::All,
            page: 1,
        }
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.status = status;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn apply<'a>(&self, transactions: &'a [Transaction], per_page: usize) -> Page<'a> {
        let mut filtered: Vec<&Transaction> = transactions
            .iter()
            .filter(|tx| tx.kind() == Some(TransactionKind::Redemption))
            .filter(|tx| match self.status {
                StatusFilter::All => true,
                StatusFilter::Status(status) => tx.status == status,
            })
            .collect();
        sort_newest_first(&mut filtered);
        paginate(&filtered, self.page.max(1), per_page)
    }
}
