use serde::{Deserialize, Serialize};

/// One listing row as scraped from the result table. `text` is the rendered
/// text of the whole row; the marker is the `datatran`/`data-train` attribute
/// that real ticket rows carry and header/spacer rows do not.
#[derive(Debug, Clone)]
pub struct RawRow {
    pub text: String,
    pub has_train_marker: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRecord {
    pub train_no: String,
    pub train_type: String,
    pub depart_station: String,
    pub arrive_station: String,
    pub depart_time: String,
    pub arrive_time: String,
    pub duration: String,
    /// All tokens of the row in original order, kept for diagnostics
    pub raw_fields: Vec<String>,
}

/// Positional layout of a listing row. Declared once; the discriminant is
/// the token index within the row text.
#[derive(Debug, Clone, Copy)]
pub enum Column {
    TrainNo = 0,
    TrainType = 1,
    DepartStation = 2,
    ArriveStation = 3,
    DepartTime = 4,
    ArriveTime = 5,
    Duration = 6,
}

fn token_at(tokens: &[String], column: Column) -> String {
    tokens.get(column as usize).cloned().unwrap_or_default()
}

/// Split a row blob on newlines/tabs, trim, drop empties, keep order.
fn tokenize(text: &str) -> Vec<String> {
    text.split(['\n', '\t'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

impl TicketRecord {
    fn from_tokens(tokens: Vec<String>) -> Self {
        TicketRecord {
            train_no: token_at(&tokens, Column::TrainNo),
            train_type: token_at(&tokens, Column::TrainType),
            depart_station: token_at(&tokens, Column::DepartStation),
            arrive_station: token_at(&tokens, Column::ArriveStation),
            depart_time: token_at(&tokens, Column::DepartTime),
            arrive_time: token_at(&tokens, Column::ArriveTime),
            duration: token_at(&tokens, Column::Duration),
            raw_fields: tokens,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.train_no.is_empty() && !self.duration.is_empty()
    }
}

/// Best-effort structured view of the scraped rows: marker rows only,
/// short rows degrade to empty fields, never an error.
pub fn extract_records(rows: &[RawRow]) -> Vec<TicketRecord> {
    rows.iter()
        .filter(|row| row.has_train_marker)
        .map(|row| TicketRecord::from_tokens(tokenize(&row.text)))
        .collect()
}

/// Keep only records usable downstream; order preserving.
pub fn valid_only(records: Vec<TicketRecord>) -> Vec<TicketRecord> {
    records
        .into_iter()
        .filter(TicketRecord::is_valid)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker_row(text: &str) -> RawRow {
        RawRow {
            text: text.to_string(),
            has_train_marker: true,
        }
    }

    #[test]
    fn tab_separated_row_maps_positionally() {
        let rows = vec![marker_row(
            "K1\tG\tShanghai\tBeijing\t08:00\t13:12\t5 hours 12 minutes",
        )];
        let records = extract_records(&rows);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.train_no, "K1");
        assert_eq!(record.train_type, "G");
        assert_eq!(record.depart_station, "Shanghai");
        assert_eq!(record.arrive_station, "Beijing");
        assert_eq!(record.depart_time, "08:00");
        assert_eq!(record.arrive_time, "13:12");
        assert_eq!(record.duration, "5 hours 12 minutes");
        assert_eq!(record.raw_fields.len(), 7);
    }

    #[test]
    fn newline_delimiters_and_padding_are_handled() {
        let rows = vec![marker_row("G102\n高铁\n  上海  \n北京\n\n\n06:27\n12:29\n6小时2分")];
        let records = extract_records(&rows);

        assert_eq!(records[0].train_no, "G102");
        assert_eq!(records[0].depart_station, "上海");
        assert_eq!(records[0].duration, "6小时2分");
    }

    #[test]
    fn rows_without_marker_are_skipped() {
        let rows = vec![
            marker_row("G1\tG\tA\tB\t08:00\t10:00\t2小时"),
            RawRow {
                text: "车次\t出发站\t到达站".to_string(),
                has_train_marker: false,
            },
            RawRow {
                text: String::new(),
                has_train_marker: false,
            },
        ];

        assert_eq!(extract_records(&rows).len(), 1);
    }

    #[test]
    fn short_row_degrades_to_empty_fields() {
        let rows = vec![marker_row("G1\tG")];
        let records = extract_records(&rows);

        assert_eq!(records[0].train_no, "G1");
        assert_eq!(records[0].train_type, "G");
        assert_eq!(records[0].duration, "");
        assert_eq!(records[0].raw_fields, vec!["G1", "G"]);
        assert!(!records[0].is_valid());
    }

    #[test]
    fn validity_needs_both_train_no_and_duration() {
        let no_duration = extract_records(&[marker_row("G1\tG\tA\tB\t08:00\t10:00")]);
        assert!(!no_duration[0].is_valid());

        let mut no_train = extract_records(&[marker_row("G1\tG\tA\tB\t08:00\t10:00\t2小时")]);
        no_train[0].train_no.clear();
        assert!(!no_train[0].is_valid());

        let records = vec![no_duration[0].clone(), no_train[0].clone()];
        assert!(valid_only(records).is_empty());
    }

    #[test]
    fn valid_only_preserves_input_order() {
        let rows = vec![
            marker_row("G3\tG\tA\tB\t08:00\t10:00\t2小时"),
            marker_row("G1\tG\tA\tB\t09:00\t11:00\t2小时"),
            marker_row("\t\t\t"),
            marker_row("G2\tG\tA\tB\t10:00\t12:00\t2小时"),
        ];

        let valid = valid_only(extract_records(&rows));
        let numbers: Vec<&str> = valid.iter().map(|t| t.train_no.as_str()).collect();
        assert_eq!(numbers, vec!["G3", "G1", "G2"]);
    }
}
