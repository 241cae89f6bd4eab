use std::fs;

use crate::_03_tickets::TicketRecord;

/// Serialize ticket records → JSON file (overwrites in full)
pub fn serialize_to_json(
    tickets: &[TicketRecord],
    path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(tickets)?;
    fs::write(path, json)?;
    Ok(())
}

/// Deserialize JSON file → ticket records
pub fn deserialize_from_json(
    path: &str,
) -> Result<Vec<TicketRecord>, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let tickets: Vec<TicketRecord> = serde_json::from_str(&content)?;
    Ok(tickets)
}
