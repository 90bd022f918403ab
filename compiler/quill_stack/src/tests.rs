use super::*;

#[test]
fn passes_through_the_closure_result() {
    assert_eq!(ensure_sufficient_stack(|| "done"), "done");
}

#[test]
fn nested_sums_do_not_overflow() {
    fn sum_to(n: u64) -> u64 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { n + sum_to(n - 1) })
    }

    // Deep enough to blow an 8MB main-thread stack without growth.
    assert_eq!(sum_to(150_000), 150_000 * 150_001 / 2);
}

#[test]
fn propagates_errors_unchanged() {
    let result: Result<u8, String> = ensure_sufficient_stack(|| Err("nope".to_string()));
    assert_eq!(result, Err("nope".to_string()));
}
