//! Aggregation of per-session attendee sets into the attendance matrix.

use std::collections::BTreeSet;

use attendance_core::models::{AttendanceMatrix, AttendeeIdentity, SessionDate, SessionMap};

/// Stateless helper that builds an [`AttendanceMatrix`] from a [`SessionMap`].
pub struct MatrixBuilder;

impl MatrixBuilder {
    /// Build the dense matrix.
    ///
    /// Rows are every attendee seen in any session, in code-point order.
    /// Columns are the session dates in chronological order.
    pub fn build(sessions: &SessionMap) -> AttendanceMatrix {
        // BTree collections give both orderings for free.
        let names: Vec<AttendeeIdentity> = sessions
            .values()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let dates: Vec<SessionDate> = sessions.keys().copied().collect();

        let cells = names
            .iter()
            .map(|name| {
                sessions
                    .values()
                    .map(|attendees| u8::from(attendees.contains(name)))
                    .collect()
            })
            .collect();

        AttendanceMatrix::new(names, dates, cells)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
