use svtree::{
    summarize, ElementType, Leaf, SummarizeRequest, SummaryValue, Svt, NA_INTEGER, NA_REAL,
};

/// Leaf whose offset is out of bounds for any dim0 below 100; visiting it is an error
fn poisoned_integer() -> Svt {
    Svt::Leaf(Leaf::integer(vec![99], vec![1]))
}

fn request(op: &str, element_type: ElementType) -> SummarizeRequest {
    SummarizeRequest::new(op, element_type)
        .expect("op resolves")
        .with_stats(true)
}

#[test]
fn any_stops_after_first_true() {
    let svt = Svt::Internal(vec![
        Svt::Empty,
        Svt::Leaf(Leaf::lacunar(vec![2])),
        poisoned_integer(),
    ]);
    let summary = summarize(&svt, &[4, 3], &request("any", ElementType::Integer))
        .expect("poisoned leaf is never reached");
    assert_eq!(summary.value, SummaryValue::Logical(Some(true)));
    let stats = summary.stats.expect("stats requested");
    assert!(stats.stopped_early);
    assert_eq!(stats.leaves_visited, 1);
}

#[test]
fn all_stops_at_first_implicit_zero() {
    let svt = Svt::Internal(vec![
        Svt::Leaf(Leaf::lacunar(vec![0, 1, 2])),
        Svt::Leaf(Leaf::integer(vec![0], vec![7])),
        poisoned_integer(),
    ]);
    let summary = summarize(&svt, &[3, 3], &request("all", ElementType::Integer))
        .expect("poisoned leaf is never reached");
    assert_eq!(summary.value, SummaryValue::Logical(Some(false)));
}

#[test]
fn na_ends_the_walk_without_na_rm() {
    let svt = Svt::Internal(vec![
        Svt::Internal(vec![
            Svt::Leaf(Leaf::integer(vec![1], vec![NA_INTEGER])),
            Svt::Empty,
        ]),
        Svt::Internal(vec![poisoned_integer(), Svt::Empty]),
    ]);
    for op in ["sum", "max", "range", "mean", "var2"] {
        let summary = summarize(&svt, &[2, 2, 2], &request(op, ElementType::Integer))
            .expect("poisoned leaf is never reached");
        assert!(summary.value.is_na(), "{} gave {:?}", op, summary.value);
        assert!(summary.stats.expect("stats requested").stopped_early);
    }
}

#[test]
fn na_rm_reads_everything() {
    let svt = Svt::Internal(vec![
        Svt::Leaf(Leaf::integer(vec![1], vec![NA_INTEGER])),
        poisoned_integer(),
    ]);
    let request = request("sum", ElementType::Integer).with_na_rm(true);
    assert!(summarize(&svt, &[2, 2], &request).is_err());
}

#[test]
fn any_na_stops_at_first_na() {
    let svt = Svt::Internal(vec![
        Svt::Leaf(Leaf::double(vec![0, 3], vec![2.0, NA_REAL])),
        Svt::Leaf(Leaf::double(vec![99], vec![1.0])),
    ]);
    let summary = summarize(&svt, &[4, 2], &request("anyNA", ElementType::Double))
        .expect("poisoned leaf is never reached");
    assert_eq!(summary.value, SummaryValue::Logical(Some(true)));
}

#[test]
fn early_exit_keeps_counts_ordered() {
    let svt = Svt::Internal(vec![
        Svt::Leaf(Leaf::integer(vec![0, 2], vec![NA_INTEGER, 4])),
        Svt::Empty,
        Svt::Empty,
    ]);
    let summary = summarize(&svt, &[3, 3], &request("prod", ElementType::Integer))
        .expect("summarize succeeds");
    assert!(summary.value.is_na());
    assert!(summary.nacount <= summary.nzcount);
    assert!(summary.nzcount <= summary.totalcount);
    assert_eq!(summary.totalcount, 3);
}
