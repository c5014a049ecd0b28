//! Stepwise sorting engines over integer arrays.
//!
//! Each function takes the input by reference and returns the sorted
//! copy inside a [`Report`], one step per comparison, swap, merge
//! placement, or digit-bucket drop. Highlights carry array indices so a
//! host can light up the bars it draws.

use stepwise_core::{EngineError, NodeId, Report, StepKind, Trace};

// ── exchange sorts ────────────────────────────────────────────────────────

/// Adjacent-swap passes; stops early once a pass makes no swap.
pub fn bubble_sort(values: &[i64]) -> Report<Vec<i64>> {
    let mut data = values.to_vec();
    let mut trace = Trace::new();
    let n = data.len();
    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - 1 - pass {
            trace.add(
                StepKind::Compare,
                format!("comparing {} with {}", data[j], data[j + 1]),
                vec![j as NodeId, (j + 1) as NodeId],
            );
            if data[j] > data[j + 1] {
                trace.add(
                    StepKind::Swap,
                    format!("swapping {} ahead of {}", data[j + 1], data[j]),
                    vec![j as NodeId, (j + 1) as NodeId],
                );
                data.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            trace.add(
                StepKind::Info,
                format!("pass {} made no swaps, the array is sorted", pass + 1),
                vec![],
            );
            break;
        }
    }
    Report::ok(data, trace)
}

/// Scan the unsorted suffix for its minimum, swap it into place.
pub fn selection_sort(values: &[i64]) -> Report<Vec<i64>> {
    let mut data = values.to_vec();
    let mut trace = Trace::new();
    let n = data.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in i + 1..n {
            trace.add(
                StepKind::Compare,
                format!("comparing {} with the current minimum {}", data[j], data[min]),
                vec![j as NodeId, min as NodeId],
            );
            if data[j] < data[min] {
                min = j;
            }
        }
        if min != i {
            trace.add(
                StepKind::Swap,
                format!("moving {} into position {i}", data[min]),
                vec![min as NodeId, i as NodeId],
            );
            data.swap(i, min);
        } else {
            trace.add(
                StepKind::Info,
                format!("{} is already in position {i}", data[i]),
                vec![i as NodeId],
            );
        }
    }
    Report::ok(data, trace)
}

/// Walk each element left through the sorted prefix until it fits.
pub fn insertion_sort(values: &[i64]) -> Report<Vec<i64>> {
    let mut data = values.to_vec();
    let mut trace = Trace::new();
    for i in 1..data.len() {
        trace.add(
            StepKind::Visit,
            format!("inserting {} into the sorted prefix", data[i]),
            vec![i as NodeId],
        );
        let mut j = i;
        while j > 0 {
            trace.add(
                StepKind::Compare,
                format!("comparing {} with {}", data[j - 1], data[j]),
                vec![(j - 1) as NodeId, j as NodeId],
            );
            if data[j - 1] <= data[j] {
                break;
            }
            data.swap(j - 1, j);
            trace.add(
                StepKind::Swap,
                format!("shifting {} right past {}", data[j], data[j - 1]),
                vec![(j - 1) as NodeId, j as NodeId],
            );
            j -= 1;
        }
    }
    Report::ok(data, trace)
}

// ── merge sort ────────────────────────────────────────────────────────────

/// Top-down merge sort through an auxiliary buffer.
pub fn merge_sort(values: &[i64]) -> Report<Vec<i64>> {
    let mut data = values.to_vec();
    let mut aux = data.clone();
    let mut trace = Trace::new();
    let n = data.len();
    if n > 1 {
        split(&mut data, &mut aux, 0, n, &mut trace);
    }
    Report::ok(data, trace)
}

fn split(data: &mut [i64], aux: &mut [i64], lo: usize, hi: usize, trace: &mut Trace) {
    if hi - lo <= 1 {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    split(data, aux, lo, mid, trace);
    split(data, aux, mid, hi, trace);
    merge(data, aux, lo, mid, hi, trace);
}

fn merge(data: &mut [i64], aux: &mut [i64], lo: usize, mid: usize, hi: usize, trace: &mut Trace) {
    aux[lo..hi].copy_from_slice(&data[lo..hi]);
    trace.add(
        StepKind::Info,
        format!("merging the runs [{lo}..{mid}) and [{mid}..{hi})"),
        (lo..hi).map(|i| i as NodeId).collect(),
    );
    let (mut l, mut r) = (lo, mid);
    for k in lo..hi {
        let take_left = if l == mid {
            false
        } else if r == hi {
            true
        } else {
            trace.add(
                StepKind::Compare,
                format!("comparing {} with {}", aux[l], aux[r]),
                vec![l as NodeId, r as NodeId],
            );
            // ties go left so equal elements keep their order
            aux[l] <= aux[r]
        };
        let v = if take_left {
            l += 1;
            aux[l - 1]
        } else {
            r += 1;
            aux[r - 1]
        };
        data[k] = v;
        trace.add(
            StepKind::Merge,
            format!("placing {v} at index {k}"),
            vec![k as NodeId],
        );
    }
}

// ── heap sort ─────────────────────────────────────────────────────────────

/// Max-heapify in place, then repeatedly swap the root to the back.
pub fn heap_sort(values: &[i64]) -> Report<Vec<i64>> {
    let mut data = values.to_vec();
    let mut trace = Trace::new();
    let n = data.len();
    if n > 1 {
        trace.add(
            StepKind::Info,
            format!("building a max-heap over {n} elements"),
            vec![],
        );
        for i in (0..n / 2).rev() {
            sift_down(&mut data, i, n, &mut trace);
        }
        for end in (1..n).rev() {
            trace.add(
                StepKind::Swap,
                format!("moving the maximum {} to index {end}", data[0]),
                vec![0, end as NodeId],
            );
            data.swap(0, end);
            sift_down(&mut data, 0, end, &mut trace);
        }
    }
    Report::ok(data, trace)
}

fn sift_down(data: &mut [i64], mut i: usize, end: usize, trace: &mut Trace) {
    loop {
        let left = 2 * i + 1;
        if left >= end {
            return;
        }
        let mut child = left;
        let right = left + 1;
        if right < end {
            trace.add(
                StepKind::Compare,
                format!("picking the larger child: {} vs {}", data[left], data[right]),
                vec![left as NodeId, right as NodeId],
            );
            if data[right] > data[left] {
                child = right;
            }
        }
        trace.add(
            StepKind::Compare,
            format!("comparing {} with its child {}", data[i], data[child]),
            vec![i as NodeId, child as NodeId],
        );
        if data[i] >= data[child] {
            return;
        }
        data.swap(i, child);
        trace.add(
            StepKind::Swap,
            format!("sifting {} down below {}", data[child], data[i]),
            vec![i as NodeId, child as NodeId],
        );
        i = child;
    }
}

// ── radix sort ────────────────────────────────────────────────────────────

/// Least-significant-digit radix sort, base 10.
///
/// Each pass distributes into buckets 0 through 9 in array order and
/// flattens them back, so elements with equal digits keep their relative
/// order. Negative input is rejected up front.
pub fn radix_sort(values: &[i64]) -> Report<Vec<i64>> {
    let mut trace = Trace::new();
    if let Some(&bad) = values.iter().find(|&&v| v < 0) {
        trace.add(
            StepKind::Info,
            format!("rejecting the input: {bad} is negative"),
            vec![],
        );
        return Report::err(
            EngineError::InvalidInput(format!(
                "radix sort takes non-negative integers, got {bad}"
            )),
            trace,
        );
    }
    let mut data = values.to_vec();
    if data.len() <= 1 {
        return Report::ok(data, trace);
    }
    let max = *data.iter().max().expect("length checked above");
    let mut exp: i64 = 1;
    let mut pass = 0;
    loop {
        pass += 1;
        let mut buckets: Vec<Vec<i64>> = vec![Vec::new(); 10];
        for (i, &v) in data.iter().enumerate() {
            let digit = ((v / exp) % 10) as usize;
            trace.add(
                StepKind::Bucket,
                format!("digit {digit} sends {v} to bucket {digit}"),
                vec![i as NodeId],
            );
            buckets[digit].push(v);
        }
        data.clear();
        for bucket in buckets {
            data.extend(bucket);
        }
        trace.add(
            StepKind::Info,
            format!("pass {pass} ordered the array by the lowest {pass} digits"),
            vec![],
        );
        // stop once the current digit was the most significant one
        if max / exp < 10 {
            break;
        }
        exp *= 10;
    }
    Report::ok(data, trace)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [i64; 8] = [170, 45, 75, 90, 802, 24, 2, 66];

    #[test]
    fn every_engine_sorts_the_sample() {
        let expect = {
            let mut v = SAMPLE.to_vec();
            v.sort_unstable();
            v
        };
        for sort in [
            bubble_sort,
            selection_sort,
            insertion_sort,
            merge_sort,
            heap_sort,
            radix_sort,
        ] {
            assert_eq!(sort(&SAMPLE).expect_ok("sorting runs"), expect);
        }
    }

    #[test]
    fn bubble_stops_after_a_clean_pass() {
        let report = bubble_sort(&[1, 2, 3, 4, 5]);
        assert!(report
            .steps
            .iter()
            .any(|s| s.kind == StepKind::Info && s.description.contains("no swaps")));
        assert!(!report.steps.iter().any(|s| s.kind == StepKind::Swap));
    }

    #[test]
    fn selection_makes_at_most_one_swap_per_position() {
        let report = selection_sort(&[5, 4, 3, 2, 1]);
        let swaps = report
            .steps
            .iter()
            .filter(|s| s.kind == StepKind::Swap)
            .count();
        assert!(swaps <= 4);
        assert_eq!(report.expect_ok("sorting runs"), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn merge_narrates_each_placement() {
        let report = merge_sort(&[3, 1, 2]);
        let placements = report
            .steps
            .iter()
            .filter(|s| s.kind == StepKind::Merge)
            .count();
        // [1] with [2] takes 2 placements, then [3] with [1,2] takes 3
        assert_eq!(placements, 5);
    }

    #[test]
    fn radix_rejects_negatives() {
        let report = radix_sort(&[3, -1, 7]);
        assert!(matches!(
            report.error(),
            Some(EngineError::InvalidInput(_))
        ));
        assert_eq!(report.steps.len(), 1);
    }

    #[test]
    fn radix_handles_uneven_digit_counts() {
        let report = radix_sort(&[1_000_000, 0, 999, 10]);
        assert_eq!(
            report.expect_ok("sorting runs"),
            vec![0, 10, 999, 1_000_000]
        );
    }

    #[test]
    fn empty_and_single_inputs_are_quiet() {
        for sort in [
            bubble_sort,
            selection_sort,
            insertion_sort,
            merge_sort,
            heap_sort,
            radix_sort,
        ] {
            assert_eq!(sort(&[]).expect_ok("sorting runs"), Vec::<i64>::new());
            let report = sort(&[7]);
            assert!(report.steps.is_empty());
            assert_eq!(report.expect_ok("sorting runs"), vec![7]);
        }
    }
}
