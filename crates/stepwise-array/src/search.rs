//! Linear and binary search over integer arrays.
//!
//! Both return a [`SearchOutcome`]: a miss is a successful outcome with
//! `found == false`, and `path` lists the indices inspected in order.

use std::cmp::Ordering;

use stepwise_core::{EngineError, NodeId, Report, SearchOutcome, StepKind, Trace};

/// Scan left to right until the target appears.
pub fn linear_search(values: &[i64], target: i64) -> Report<SearchOutcome> {
    let mut trace = Trace::new();
    let mut path = Vec::new();
    for (i, &v) in values.iter().enumerate() {
        path.push(i as NodeId);
        trace.add(
            StepKind::Compare,
            format!("comparing {target} with {v} at index {i}"),
            vec![i as NodeId],
        );
        if v == target {
            trace.add(
                StepKind::Found,
                format!("found {target} at index {i}"),
                vec![i as NodeId],
            );
            return Report::ok(SearchOutcome::hit(path), trace);
        }
    }
    trace.add(
        StepKind::NotFound,
        format!("{target} is not in the array"),
        vec![],
    );
    Report::ok(SearchOutcome::miss(path), trace)
}

/// Halve a sorted range around the target. Unsorted input is rejected.
pub fn binary_search(values: &[i64], target: i64) -> Report<SearchOutcome> {
    let mut trace = Trace::new();
    if let Some(i) = values.windows(2).position(|w| w[0] > w[1]) {
        trace.add(
            StepKind::Info,
            format!(
                "index {i} breaks the sorted order ({} > {})",
                values[i],
                values[i + 1]
            ),
            vec![i as NodeId, (i + 1) as NodeId],
        );
        return Report::err(
            EngineError::InvalidInput("binary search needs a sorted array".into()),
            trace,
        );
    }

    let mut path = Vec::new();
    let (mut lo, mut hi) = (0usize, values.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        path.push(mid as NodeId);
        trace.add(
            StepKind::Compare,
            format!("comparing {target} with {} at the midpoint {mid}", values[mid]),
            vec![mid as NodeId],
        );
        match values[mid].cmp(&target) {
            Ordering::Equal => {
                trace.add(
                    StepKind::Found,
                    format!("found {target} at index {mid}"),
                    vec![mid as NodeId],
                );
                return Report::ok(SearchOutcome::hit(path), trace);
            }
            Ordering::Less => lo = mid + 1,
            Ordering::Greater => hi = mid,
        }
    }
    trace.add(
        StepKind::NotFound,
        format!("the range emptied without {target}"),
        vec![],
    );
    Report::ok(SearchOutcome::miss(path), trace)
}
