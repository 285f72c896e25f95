//! CSV export of a calendar's campaigns.

use crate::campaign::Campaign;

const HEADERS: [&str; 7] = [
    "Número",
    "Nome",
    "Data Início",
    "Data Fim",
    "Objetivo",
    "Descrição",
    "Oferta",
];

/// Display format for dates in exports (pt-BR convention).
const EXPORT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Render the campaign list as CSV, one numbered row per campaign.
pub fn render_csv(campaigns: &[Campaign]) -> String {
    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(|h| h.to_string()));

    for (index, campaign) in campaigns.iter().enumerate() {
        push_row(
            &mut out,
            &[
                (index + 1).to_string(),
                campaign.name.clone(),
                campaign.start_date.format(EXPORT_DATE_FORMAT).to_string(),
                campaign.end_date.format(EXPORT_DATE_FORMAT).to_string(),
                campaign.objective.clone().unwrap_or_default(),
                campaign.description.clone().unwrap_or_default(),
                campaign.offer.clone().unwrap_or_default(),
            ],
        );
    }

    out
}

fn push_row(out: &mut String, fields: &[String; 7]) {
    let row = fields
        .iter()
        .map(|f| escape(f))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&row);
    out.push_str("\r\n");
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::DateSelection;
    use chrono::NaiveDate;

    fn make_campaign(name: &str) -> Campaign {
        Campaign::from_selection(&DateSelection {
            date: NaiveDate::from_ymd_opt(2025, 5, 11).unwrap(),
            title: name.to_string(),
            description: Some("Campanha sazonal".to_string()),
        })
    }

    #[test]
    fn header_row_comes_first() {
        let csv = render_csv(&[]);
        assert!(csv.starts_with("Número,Nome,Data Início,Data Fim,Objetivo,Descrição,Oferta\r\n"));
    }

    #[test]
    fn rows_are_numbered_and_dates_localized() {
        let csv = render_csv(&[make_campaign("Dia das Mães")]);
        let line = csv.lines().nth(1).unwrap();
        assert!(line.starts_with("1,Dia das Mães,11/05/2025,11/05/2025,"));
    }

    #[test]
    fn fields_with_commas_and_quotes_are_escaped() {
        let mut campaign = make_campaign("Mães, flores e \"amor\"");
        campaign.offer = Some("10% off".to_string());
        let csv = render_csv(&[campaign]);
        assert!(csv.contains("\"Mães, flores e \"\"amor\"\"\""));
        assert!(csv.contains("10% off"));
    }

    #[test]
    fn one_row_per_campaign() {
        let csv = render_csv(&[make_campaign("A"), make_campaign("B")]);
        assert_eq!(csv.lines().count(), 3);
    }
}
