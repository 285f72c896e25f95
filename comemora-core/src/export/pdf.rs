//! PDF export: a fixed-layout month grid plus a campaign detail table.
//!
//! The document is assembled from raw content-stream operations with
//! hand-tuned offsets on a US-Letter page. Text is emitted as WinAnsi bytes
//! so Portuguese accents render with the built-in Helvetica fonts.

use chrono::{Datelike, Duration, NaiveDate};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat};

use crate::campaign::Campaign;
use crate::error::{ComemoraError, ComemoraResult};

const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;

const GRID_LEFT: i64 = 46;
const GRID_TOP: i64 = 706;
const CELL_WIDTH: i64 = 74;
const CELL_HEIGHT: i64 = 88;
const GRID_ROWS: i64 = 6;

const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

const WEEKDAY_NAMES: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

/// Render the campaign list as a two-page PDF: a grid for `month` (any day
/// of the target month is accepted) and a detail table of every campaign.
pub fn render_pdf(campaigns: &[Campaign], month: NaiveDate) -> ComemoraResult<Vec<u8>> {
    let first = month
        .with_day(1)
        .ok_or_else(|| ComemoraError::Export("invalid month".to_string()))?;

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary("Helvetica"));
    let bold_id = doc.add_object(font_dictionary("Helvetica-Bold"));

    let grid_page = add_page(&mut doc, pages_id, grid_operations(campaigns, first))?;
    let table_page = add_page(&mut doc, pages_id, table_operations(campaigns))?;

    let fonts = Dictionary::from_iter(vec![
        ("F1", Object::Reference(regular_id)),
        ("F2", Object::Reference(bold_id)),
    ]);
    let resources = Dictionary::from_iter(vec![("Font", Object::Dictionary(fonts))]);

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(2)),
        (
            "Kids",
            Object::Array(vec![
                Object::Reference(grid_page),
                Object::Reference(table_page),
            ]),
        ),
        ("Resources", Object::Dictionary(resources)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ComemoraError::Export(e.to_string()))?;
    Ok(buffer)
}

fn font_dictionary(base_font: &str) -> Dictionary {
    Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(base_font.as_bytes().to_vec())),
        ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
    ])
}

fn add_page(
    doc: &mut Document,
    pages_id: lopdf::ObjectId,
    operations: Vec<Operation>,
) -> ComemoraResult<lopdf::ObjectId> {
    let content = Content { operations };
    let encoded = content
        .encode()
        .map_err(|e| ComemoraError::Export(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

    let page = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH),
                Object::Integer(PAGE_HEIGHT),
            ]),
        ),
        ("Contents", Object::Reference(content_id)),
    ]);
    Ok(doc.add_object(page))
}

/// Page 1: the month grid.
fn grid_operations(campaigns: &[Campaign], first: NaiveDate) -> Vec<Operation> {
    let mut ops = Vec::new();

    let title = format!(
        "Calendário de Campanhas — {} {}",
        MONTH_NAMES[first.month0() as usize],
        first.year()
    );
    text(&mut ops, b"F2", 16, 50, 750, &title);

    for (index, name) in WEEKDAY_NAMES.iter().enumerate() {
        let x = GRID_LEFT + index as i64 * CELL_WIDTH + 4;
        text(&mut ops, b"F2", 9, x, GRID_TOP + 6, name);
    }

    for row in 0..GRID_ROWS {
        for col in 0..7 {
            stroke_rect(
                &mut ops,
                GRID_LEFT + col * CELL_WIDTH,
                GRID_TOP - (row + 1) * CELL_HEIGHT,
                CELL_WIDTH,
                CELL_HEIGHT,
            );
        }
    }

    let offset = first.weekday().num_days_from_sunday() as i64;
    let days = days_in_month(first);

    for day in 1..=days {
        let slot = offset + day - 1;
        let row = slot / 7;
        let col = slot % 7;
        let cell_left = GRID_LEFT + col * CELL_WIDTH;
        let cell_top = GRID_TOP - row * CELL_HEIGHT;

        text(&mut ops, b"F2", 8, cell_left + 4, cell_top - 12, &day.to_string());

        let date = first + Duration::days(day - 1);
        let mut line = 0;
        for campaign in campaigns
            .iter()
            .filter(|c| c.start_date <= date && date <= c.end_date)
        {
            if line >= 4 {
                break;
            }
            text(
                &mut ops,
                b"F1",
                7,
                cell_left + 4,
                cell_top - 23 - line * 9,
                &truncate(&campaign.name, 17),
            );
            line += 1;
        }
    }

    ops
}

/// Page 2: the detail table.
fn table_operations(campaigns: &[Campaign]) -> Vec<Operation> {
    let mut ops = Vec::new();

    text(&mut ops, b"F2", 16, 50, 750, "Campanhas");

    let columns: [(i64, &str); 5] = [
        (50, "Nº"),
        (80, "Nome"),
        (290, "Início"),
        (360, "Fim"),
        (430, "Descrição"),
    ];
    for (x, label) in columns {
        text(&mut ops, b"F2", 10, x, 720, label);
    }

    let mut y = 702;
    for (index, campaign) in campaigns.iter().enumerate() {
        if y < 60 {
            text(&mut ops, b"F1", 9, 50, y, "...");
            break;
        }
        text(&mut ops, b"F1", 9, 50, y, &(index + 1).to_string());
        text(&mut ops, b"F1", 9, 80, y, &truncate(&campaign.name, 40));
        text(
            &mut ops,
            b"F1",
            9,
            290,
            y,
            &campaign.start_date.format("%d/%m/%Y").to_string(),
        );
        text(
            &mut ops,
            b"F1",
            9,
            360,
            y,
            &campaign.end_date.format("%d/%m/%Y").to_string(),
        );
        text(
            &mut ops,
            b"F1",
            9,
            430,
            y,
            &truncate(campaign.description.as_deref().unwrap_or(""), 28),
        );
        y -= 16;
    }

    ops
}

fn text(ops: &mut Vec<Operation>, font: &[u8], size: i64, x: i64, y: i64, content: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![Object::Name(font.to_vec()), Object::Integer(size)],
    ));
    ops.push(Operation::new(
        "Td",
        vec![Object::Integer(x), Object::Integer(y)],
    ));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(win_ansi(content), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
}

fn stroke_rect(ops: &mut Vec<Operation>, x: i64, y: i64, width: i64, height: i64) {
    ops.push(Operation::new(
        "re",
        vec![
            Object::Integer(x),
            Object::Integer(y),
            Object::Integer(width),
            Object::Integer(height),
        ],
    ));
    ops.push(Operation::new("S", vec![]));
}

/// Encode text as WinAnsi bytes. The Latin-1 range covers Portuguese
/// diacritics; anything else becomes '?'.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E => c as u8,
            0xA0..=0xFF => c as u8,
            0x2014 => 0x97, // em dash used in the title
            _ => b'?',
        })
        .collect()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max_chars).collect();
        out.push_str("...");
        out
    }
}

fn days_in_month(first: NaiveDate) -> i64 {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    // The first of the following month always exists.
    (next.unwrap() - first).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::DateSelection;

    fn make_campaign(date: &str, name: &str) -> Campaign {
        Campaign::from_selection(&DateSelection {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            title: name.to_string(),
            description: Some("Campanha sazonal".to_string()),
        })
    }

    #[test]
    fn renders_a_two_page_document() {
        let campaigns = vec![
            make_campaign("2025-05-11", "Dia das Mães"),
            make_campaign("2025-05-25", "Liquidação de Outono"),
        ];
        let month = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();

        let bytes = render_pdf(&campaigns, month).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn accepts_any_day_of_the_target_month() {
        let day = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        assert!(render_pdf(&[], day).is_ok());
    }

    #[test]
    fn win_ansi_keeps_portuguese_diacritics() {
        assert_eq!(win_ansi("Mães"), vec![b'M', 0xE3, b'e', b's']);
        assert_eq!(win_ansi("ção"), vec![0xE7, 0xE3, b'o']);
        assert_eq!(win_ansi("日"), vec![b'?']);
    }

    #[test]
    fn days_in_month_handles_year_boundary() {
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()), 31);
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()), 29);
    }
}
