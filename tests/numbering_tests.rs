use ledgerly::core::*;

#[test]
fn fresh_pool_yields_sequential_numbers() {
    let mut pool = InvoiceNumberPool::new();
    let numbers: Vec<String> = (0..5).map(|_| pool.allocate()).collect();
    assert_eq!(
        numbers,
        vec![
            "INV-00001",
            "INV-00002",
            "INV-00003",
            "INV-00004",
            "INV-00005",
        ]
    );
}

#[test]
fn no_duplicates_over_many_allocations() {
    let mut pool = InvoiceNumberPool::new();
    let mut seen = std::collections::BTreeSet::new();
    for _ in 0..1000 {
        assert!(seen.insert(pool.allocate()));
    }
}

#[test]
fn lowest_released_beats_sequential_counter() {
    // released = {3, 7}, next = 10 → allocate returns INV-00003
    let mut pool = InvoiceNumberPool::new();
    for _ in 0..9 {
        pool.allocate();
    }
    pool.release("INV-00003");
    pool.release("INV-00007");
    assert_eq!(pool.next_raw(), 10);

    assert_eq!(pool.allocate(), "INV-00003");
    assert_eq!(pool.allocate(), "INV-00007");
    assert_eq!(pool.allocate(), "INV-00010");
}

#[test]
fn allocate_never_returns_a_locked_number() {
    let mut pool = InvoiceNumberPool::new();
    let first = pool.allocate();
    let second = pool.allocate();
    pool.lock(&first);
    pool.lock(&second);
    pool.release(&first); // silent no-op

    for _ in 0..100 {
        let n = pool.allocate();
        assert_ne!(n, first);
        assert_ne!(n, second);
        assert!(!pool.is_locked(&n));
    }
}

#[test]
fn release_on_locked_number_is_a_noop() {
    let mut pool = InvoiceNumberPool::new();
    let n = pool.allocate();
    pool.lock(&n);

    let before = pool.clone();
    pool.release(&n);
    assert_eq!(pool, before);
}

#[test]
fn release_then_lock_leaves_number_locked_only() {
    let mut pool = InvoiceNumberPool::new();
    let n = pool.allocate();
    pool.release(&n);
    pool.lock(&n);

    assert!(pool.is_locked(&n));
    assert_eq!(pool.released().count(), 0);
}

#[test]
fn released_numbers_come_back_in_ascending_order() {
    let mut pool = InvoiceNumberPool::new();
    for _ in 0..6 {
        pool.allocate();
    }
    // Release out of order
    pool.release("INV-00005");
    pool.release("INV-00002");
    pool.release("INV-00004");

    assert_eq!(pool.allocate(), "INV-00002");
    assert_eq!(pool.allocate(), "INV-00004");
    assert_eq!(pool.allocate(), "INV-00005");
}

#[test]
fn persisted_pool_resumes_exactly() {
    let mut pool = InvoiceNumberPool::new();
    for _ in 0..4 {
        pool.allocate();
    }
    pool.release("INV-00002");
    pool.lock("INV-00003");

    let json = serde_json::to_string(&pool).unwrap();
    let mut restored: InvoiceNumberPool = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, pool);
    assert_eq!(restored.allocate(), "INV-00002");
    assert_eq!(restored.allocate(), "INV-00005");
}
