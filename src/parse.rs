use scraper::{ElementRef, Html, Selector};

use crate::table::{Cell, Header, RawTable};
use crate::{Error, Result, STATS_TABLE_CLASS};

/// What a report page yields: its title and its statistics tables in document order.
/// A table that couldn't be read is kept as its error so later ones keep their position.
#[derive(Debug)]
pub struct Page {
    pub title: Option<String>,
    pub tables: Vec<Result<RawTable>>,
}

/// Attempts to parse the page, extracting the title and every statistics table.
pub fn parse_page(html: &str) -> Result<Page> {
    let doc = Html::parse_document(html);
    let selectors = TableSelectors::new()?;

    let title_selector = create_selector("h1")?;
    let title = doc
        .select(&title_selector)
        .next()
        .map(|h1| collapse_ws(&h1.text().collect::<String>()));

    let tables = locate_tables(&doc)?
        .into_iter()
        .map(|table| extract_table(table, &selectors))
        .collect();

    Ok(Page { title, tables })
}

/// Every `<table>` whose class mentions the statistics marker, in document order.
pub fn locate_tables(doc: &Html) -> Result<Vec<ElementRef<'_>>> {
    let selector = create_selector(&format!(r#"table[class*="{STATS_TABLE_CLASS}"]"#))?;
    Ok(doc.select(&selector).collect())
}

/// Largest `colspan` browsers honour.
const MAX_COLSPAN: usize = 1000;

struct TableSelectors {
    header_rows: Selector,
    body_rows: Selector,
    cells: Selector,
}

impl TableSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            header_rows: create_selector("thead > tr")?,
            body_rows: create_selector("tbody > tr, tfoot > tr")?,
            cells: create_selector("th, td")?,
        })
    }
}

fn extract_table(table: ElementRef, sel: &TableSelectors) -> Result<RawTable> {
    let levels = table
        .select(&sel.header_rows)
        .map(|tr| expand_row(tr, sel, collapse_ws))
        .collect();
    let header = Header::from_levels(levels)?;

    let rows = table
        .select(&sel.body_rows)
        .filter(|tr| !is_repeated_header(tr))
        .map(|tr| expand_row(tr, sel, |text| Cell::from_text(&collapse_ws(text))))
        .collect();

    RawTable::new(header, rows)
}

/// Reads the cells of one `<tr>`, repeating a cell's value over its `colspan`.
fn expand_row<T: Clone>(tr: ElementRef, sel: &TableSelectors, read: impl Fn(&str) -> T) -> Vec<T> {
    let mut out = Vec::new();
    for cell in tr.select(&sel.cells) {
        let span = cell
            .value()
            .attr("colspan")
            .and_then(|c| c.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .clamp(1, MAX_COLSPAN);
        let value = read(&cell.text().collect::<String>());
        out.extend(std::iter::repeat(value).take(span));
    }
    out
}

/// Long tables repeat their column labels inside the body.
fn is_repeated_header(tr: &ElementRef) -> bool {
    tr.value()
        .attr("class")
        .is_some_and(|class| class.split_whitespace().any(|c| c == "thead"))
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}

#[inline]
fn collapse_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
