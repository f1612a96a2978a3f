//! Field-order conversions between tagged date bodies.
//!
//! A lattice is materialized once by enumerating every (month word, day word)
//! pair. Each arc maps the exact `month: ".." day: ".."` text of one ordering
//! to the text of the other, so applying a lattice is a single map lookup on
//! the body produced by a source grammar.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::graph::Graph;

const YEAR_KEY: &str = "year:";

/// Which conversion a lattice performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReorderKind {
    /// `year month day` -> `month day year`
    YmdToMdy,
    /// `year month day` -> `day month year`
    YmdToDmy,
    /// `month day year` -> `day month year`; a year is required.
    MdyToDmy,
    /// `month day` -> `day month`
    MdToDm,
}

impl ReorderKind {
    pub const ALL: [ReorderKind; 4] = [
        ReorderKind::YmdToMdy,
        ReorderKind::YmdToDmy,
        ReorderKind::MdyToDmy,
        ReorderKind::MdToDm,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::YmdToMdy => "ymd->mdy",
            Self::YmdToDmy => "ymd->dmy",
            Self::MdyToDmy => "mdy->dmy",
            Self::MdToDm => "md->dm",
        }
    }
}

impl fmt::Display for ReorderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn month_day(month: &str, day: &str) -> String {
    format!("month: \"{month}\" day: \"{day}\"")
}

fn day_month(day: &str, month: &str) -> String {
    format!("day: \"{day}\" month: \"{month}\"")
}

/// A materialized field-order conversion.
pub struct ReorderLattice {
    kind: ReorderKind,
    arcs: HashMap<String, String>,
}

impl ReorderLattice {
    /// Enumerate every month x day arc for `kind`.
    pub fn build(kind: ReorderKind, months: &[&str], days: &[&str]) -> Self {
        let mut arcs = HashMap::with_capacity(months.len() * days.len());
        for month in months {
            for day in days {
                let (from, to) = match kind {
                    // keyed on the trailing ` month: .. day: ..` of a ymd body
                    ReorderKind::YmdToMdy => (
                        format!(" {}", month_day(month, day)),
                        format!("{} ", month_day(month, day)),
                    ),
                    ReorderKind::YmdToDmy => (
                        format!(" {}", month_day(month, day)),
                        format!("{} ", day_month(day, month)),
                    ),
                    // keyed on the leading `month: .. day: .. ` before the year
                    ReorderKind::MdyToDmy => (
                        format!("{} ", month_day(month, day)),
                        format!("{} ", day_month(day, month)),
                    ),
                    ReorderKind::MdToDm => (month_day(month, day), day_month(day, month)),
                };
                arcs.insert(from, to);
            }
        }
        tracing::debug!("Built {} lattice with {} arcs", kind, arcs.len());
        Self { kind, arcs }
    }

    /// Number of (month, day) arcs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Reorder one tagged body, or `None` if it is not in this lattice's
    /// source ordering.
    pub fn apply(&self, body: &str) -> Option<String> {
        match self.kind {
            ReorderKind::YmdToMdy | ReorderKind::YmdToDmy => {
                if !body.starts_with(YEAR_KEY) {
                    return None;
                }
                let split = body.rfind(" month: \"")?;
                let (year, tail) = body.split_at(split);
                let head = self.arcs.get(tail)?;
                Some(format!("{head}{year}"))
            }
            ReorderKind::MdyToDmy => {
                let split = body.find(YEAR_KEY)?;
                let (head, year) = body.split_at(split);
                let head = self.arcs.get(head)?;
                Some(format!("{head}{year}"))
            }
            ReorderKind::MdToDm => self.arcs.get(body).cloned(),
        }
    }

    /// Feed every output of `source` through this lattice.
    pub fn over(self: &Arc<Self>, source: Graph) -> Graph {
        let lattice = Arc::clone(self);
        source.rewrite(move |body| lattice.apply(body))
    }
}

impl fmt::Debug for ReorderLattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReorderLattice")
            .field("kind", &self.kind)
            .field("arcs", &self.arcs.len())
            .finish()
    }
}
