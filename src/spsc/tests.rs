use super::*;
use crate::Producer;
cfg_not_loom! {
use proptest::prelude::*;
use std::collections::VecDeque;
use std::rc::Rc;
use crate::sync::atomic::AtomicUsize;
use crate::sync::atomic::Ordering::Release;

#[test]
fn fresh_ring_is_empty() {
    let ring = RingState::<i32, 16>::new();
    let mut sink = unsafe { Consumer::new(&ring) };
    assert_eq!(sink.pop(), None);
}

#[test]
fn st_insert_remove() {
    let ring = RingState::<i32, 16>::new();
    let mut src = unsafe { Producer::new(&ring) };
    let mut sink = unsafe { Consumer::new(&ring) };

    for i in 0..10 {
        src.push(i);
    }
    for i in 0..10 {
        assert_eq!(sink.pop(), Some(i));
    }
    assert_eq!(sink.pop(), None);
}

#[test]
fn full_ring_reads_empty() {
    let ring = RingState::<i32, 8>::new();
    let mut src = unsafe { Producer::new(&ring) };
    let mut sink = unsafe { Consumer::new(&ring) };

    for i in 0..8 {
        src.push(i);
    }
    assert_eq!(sink.pop(), None);
}

#[test]
fn wrap_around() {
    let ring = RingState::<u32, 4>::new();
    let mut src = unsafe { Producer::new(&ring) };
    let mut sink = unsafe { Consumer::new(&ring) };

    for round in 0..10 {
        for i in 0..3 {
            src.push(round * 3 + i);
        }
        for i in 0..3 {
            assert_eq!(sink.pop(), Some(round * 3 + i));
        }
        assert_eq!(sink.pop(), None);
    }
}

#[test]
fn overrun_replaces_oldest() {
    let ring = RingState::<u32, 4>::new();
    let mut src = unsafe { Producer::new(&ring) };
    let mut sink = unsafe { Consumer::new(&ring) };

    for i in 0..5 {
        src.push(i);
    }
    let drained: Vec<_> = std::iter::from_fn(|| sink.pop()).collect();
    assert_eq!(drained, [4]);
    assert_ne!(drained, [0, 1, 2, 3, 4]);
}

#[test]
fn capacity_one_overwrites() {
    let first = Rc::new(1);
    let second = Rc::new(2);
    let ring = RingState::<Rc<i32>, 1>::new();
    let mut src = unsafe { Producer::new(&ring) };
    let mut sink = unsafe { Consumer::new(&ring) };

    src.push(first.clone());
    src.push(second.clone());
    assert_eq!(Rc::strong_count(&first), 1, "second push should drop the first item");
    assert_eq!(Rc::strong_count(&second), 2);
    // the published index always equals the read position.
    assert_eq!(sink.pop(), None);
}

#[test]
fn move_only_keeps_identity() {
    let ring = RingState::<Box<i32>, 8>::new();
    let mut src = unsafe { Producer::new(&ring) };
    let mut sink = unsafe { Consumer::new(&ring) };

    let boxed = Box::new(42);
    let addr: *const i32 = &*boxed;
    src.push(boxed);
    src.emplace(|| Box::new(100));

    let out = sink.pop().unwrap();
    assert_eq!(*out, 42);
    assert!(std::ptr::eq(addr, &*out));
    assert_eq!(sink.pop().as_deref(), Some(&100));
    assert_eq!(sink.pop(), None);
}

#[test]
fn push_and_emplace_strings() {
    let ring = RingState::<String, 8>::new();
    let mut src = unsafe { Producer::new(&ring) };
    let mut sink = unsafe { Consumer::new(&ring) };

    src.push("Hello".to_owned());
    src.push("World".to_owned());
    src.emplace(|| String::from("Test"));

    assert_eq!(sink.pop().as_deref(), Some("Hello"));
    assert_eq!(sink.pop().as_deref(), Some("World"));
    assert_eq!(sink.pop().as_deref(), Some("Test"));
    assert_eq!(sink.pop(), None);
}

#[test]
fn popped_items_leave_the_ring() {
    let rc = Rc::new(());
    let ring = RingState::<Rc<()>, 4>::new();
    let mut src = unsafe { Producer::new(&ring) };
    let mut sink = unsafe { Consumer::new(&ring) };

    src.push(rc.clone());
    src.push(rc.clone());
    drop(sink.pop());
    assert_eq!(Rc::strong_count(&rc), 2);
    drop(ring);
    assert_eq!(Rc::strong_count(&rc), 1);
}

#[test]
fn mt_insert_remove() {
    const COUNT: usize = 100_000;
    const CAP: usize = 64;
    let ring = RingState::<usize, CAP>::new();
    // keeps the producer from lapping the consumer.
    let consumed = AtomicUsize::new(0);

    std::thread::scope(|s| {
        let mut src = unsafe { Producer::new(&ring) };
        let mut sink = unsafe { Consumer::new(&ring) };
        let consumed = &consumed;

        s.spawn(move || {
            for i in 0..COUNT {
                while i - consumed.load(Acquire) >= CAP - 1 {
                    std::thread::yield_now();
                }
                src.push(i);
            }
        });

        for i in 0..COUNT {
            let got = loop {
                match sink.pop() {
                    Some(got) => break got,
                    None => std::hint::spin_loop(),
                }
            };
            assert_eq!(got, i, "Data should be received in the same order as it was sent.");
            consumed.store(i + 1, Release);
        }
    });
}

#[derive(Debug, Clone)]
enum Op {
    Push(u16),
    Pop,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![any::<u16>().prop_map(Op::Push), Just(Op::Pop)]
}

proptest! {
    #[test]
    fn prop_fifo(items in proptest::collection::vec(any::<u32>(), 0..32)) {
        let ring = RingState::<u32, 32>::new();
        let mut src = unsafe { Producer::new(&ring) };
        let mut sink = unsafe { Consumer::new(&ring) };

        for &item in &items {
            src.push(item);
        }
        for &item in &items {
            prop_assert_eq!(sink.pop(), Some(item));
        }
        prop_assert_eq!(sink.pop(), None);
    }

    #[test]
    fn prop_matches_bounded_deque(ops in proptest::collection::vec(op(), 0..256)) {
        let ring = RingState::<u16, 8>::new();
        let mut src = unsafe { Producer::new(&ring) };
        let mut sink = unsafe { Consumer::new(&ring) };
        let mut model = VecDeque::new();

        for op in ops {
            match op {
                // never let the producer lap the consumer.
                Op::Push(_) if model.len() == ring.capacity() - 1 => {}
                Op::Push(item) => {
                    src.push(item);
                    model.push_back(item);
                }
                Op::Pop => {
                    prop_assert_eq!(sink.pop(), model.pop_front());
                }
            }
        }
    }
}

}

cfg_loom! {
use crate::sync::atomic::AtomicUsize;
use crate::sync::atomic::Ordering::Release;
use crate::sync::Arc;
use loom::thread;

#[test]
fn mt_insert_remove() {
    loom::model(|| {
        let ring = Arc::new(RingState::<u8, 4>::new());
        let src_ring = ring.clone();
        thread::spawn(move || {
            let mut src = unsafe { Producer::new(&src_ring) };
            for i in 0..3 {
                src.push(i);
            }
        });

        let mut sink = unsafe { Consumer::new(&ring) };
        for i in 0..3 {
            let got = loop {
                match sink.pop() {
                    Some(got) => break got,
                    None => thread::yield_now(),
                }
            };
            assert_eq!(got, i, "Data should be received in the same order as it was sent.");
        }
    });
}

#[test]
fn slot_reuse() {
    let mut model = loom::model::Builder::new();
    model.max_threads = 2;
    model.check(|| {
        // capacity 2 holds one item at a time, so every push reuses a slot.
        let ring = Arc::new(RingState::<u8, 2>::new());
        let consumed = Arc::new(AtomicUsize::new(0));
        let (src_ring, src_consumed) = (ring.clone(), consumed.clone());
        thread::spawn(move || {
            let mut src = unsafe { Producer::new(&src_ring) };
            for i in 0..3u8 {
                while usize::from(i) != src_consumed.load(Acquire) {
                    thread::yield_now();
                }
                src.push(i);
            }
        });

        let mut sink = unsafe { Consumer::new(&ring) };
        for i in 0..3 {
            let got = loop {
                match sink.pop() {
                    Some(got) => break got,
                    None => thread::yield_now(),
                }
            };
            assert_eq!(got, i);
            consumed.store(usize::from(i) + 1, Release);
        }
    });
}
}
