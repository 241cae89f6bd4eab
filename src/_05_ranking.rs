use crate::_03_tickets::TicketRecord;
use crate::_04_duration::duration_to_minutes;

/// Shortest-duration subset: stable ascending sort by computed minutes
/// (ties keep their input order), then the first `n` records.
pub fn top_by_duration(mut records: Vec<TicketRecord>, n: usize) -> Vec<TicketRecord> {
    records.sort_by_key(|record| duration_to_minutes(&record.duration));
    records.truncate(n);
    records
}
