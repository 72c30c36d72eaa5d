// File: comparator.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::baseline::BaselineSet;
use crate::probe::ProbeResponse;
use crate::similarity::sequence_ratio;

// Bodies must be strictly more similar than this to count as the same page.
pub const SIMILARITY_THRESHOLD: f64 = 0.95;

/// Whether two responses are equivalent for baseline purposes.
///
/// An absent baseline matches nothing. Failed records never match anything.
/// Redirects (301-303) are compared by their target alone; all other
/// responses by fuzzy body similarity.
pub fn responses_equal(record: &ProbeResponse, baseline: Option<&ProbeResponse>) -> bool {
    let baseline = match baseline {
        Some(baseline) => baseline,
        None => return false,
    };
    if record.failed() || baseline.failed() {
        return false;
    }
    if record.status() != baseline.status() {
        return false;
    }
    if record.is_redirect() {
        return record.location() == baseline.location();
    }
    sequence_ratio(record.body(), baseline.body()) > SIMILARITY_THRESHOLD
}

/// Flags the record as interesting iff it matches neither available baseline.
/// Failed records are left untouched. Idempotent.
pub fn annotate(record: &mut ProbeResponse, baselines: &BaselineSet) {
    if record.failed() {
        return;
    }
    if !responses_equal(record, baselines.default_response())
        && !responses_equal(record, baselines.direct_response())
    {
        record.mark_interesting();
    }
}

#[cfg(test)]
#[path = "comparator_tests.rs"]
mod tests;
