//! Shared fixtures for the unit tests.

use core::alloc::Layout;
use core::cell::Cell;
use core::ptr::NonNull;

use std::rc::Rc;

use crate::allocator::{Allocator, Global};
use crate::error::{AllocError, Result};

pub(crate) const RNG_SEED: [u8; 32] = [
    0x4b, 0x65, 0x65, 0x6c, 0x20, 0x72, 0x6e, 0x67, 0x20, 0x73, 0x65, 0x65, 0x64, 0x21, 0x00, 0x01,
    0x9e, 0x37, 0x79, 0xb9, 0x7f, 0x4a, 0x7c, 0x15, 0xf3, 0x9c, 0xc0, 0x60, 0x5c, 0xed, 0xc8, 0x34,
];

/// Counts how many of its [`Droppable`]s were created and dropped.
#[derive(Debug, Default)]
pub(crate) struct DropCounter {
    created: Rc<Cell<usize>>,
    dropped: Rc<Cell<usize>>,
}

impl DropCounter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn new_droppable<T>(&self, value: T) -> Droppable<T> {
        self.created.set(self.created.get() + 1);
        Droppable {
            value,
            created: self.created.clone(),
            dropped: self.dropped.clone(),
        }
    }

    pub(crate) fn created(&self) -> usize {
        self.created.get()
    }

    pub(crate) fn dropped(&self) -> usize {
        self.dropped.get()
    }
}

#[derive(Debug)]
pub(crate) struct Droppable<T = ()> {
    pub value: T,
    created: Rc<Cell<usize>>,
    dropped: Rc<Cell<usize>>,
}

impl<T: Clone> Clone for Droppable<T> {
    fn clone(&self) -> Self {
        self.created.set(self.created.get() + 1);
        Droppable {
            value: self.value.clone(),
            created: self.created.clone(),
            dropped: self.dropped.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for Droppable<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Drop for Droppable<T> {
    fn drop(&mut self) {
        self.dropped.set(self.dropped.get() + 1);
    }
}

/// Tracks the number of live [`Fragile`] values and limits how many more
/// times they may be cloned.
#[derive(Debug)]
pub(crate) struct LiveTracker {
    live: Rc<Cell<usize>>,
    clone_budget: Rc<Cell<usize>>,
}

impl LiveTracker {
    pub(crate) fn new() -> Self {
        LiveTracker {
            live: Rc::new(Cell::new(0)),
            clone_budget: Rc::new(Cell::new(usize::MAX)),
        }
    }

    pub(crate) fn fragile(&self, value: u32) -> Fragile {
        self.live.set(self.live.get() + 1);
        Fragile {
            value,
            live: self.live.clone(),
            clone_budget: self.clone_budget.clone(),
        }
    }

    /// Lets the next `n` clones succeed; the one after that panics.
    pub(crate) fn allow_clones(&self, n: usize) {
        self.clone_budget.set(n);
    }

    pub(crate) fn live(&self) -> usize {
        self.live.get()
    }
}

/// A value whose `Clone` implementation panics once its tracker's budget
/// is used up.
#[derive(Debug)]
pub(crate) struct Fragile {
    pub value: u32,
    live: Rc<Cell<usize>>,
    clone_budget: Rc<Cell<usize>>,
}

impl Clone for Fragile {
    fn clone(&self) -> Self {
        let budget = self.clone_budget.get();
        if budget == 0 {
            panic!("clone of fragile value {} failed", self.value);
        }
        self.clone_budget.set(budget - 1);
        self.live.set(self.live.get() + 1);
        Fragile {
            value: self.value,
            live: self.live.clone(),
            clone_budget: self.clone_budget.clone(),
        }
    }
}

impl PartialEq for Fragile {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for Fragile {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

/// Allocation statistics shared by all clones of a [`TestAlloc`].
#[derive(Debug, Default)]
pub(crate) struct Stats {
    allocations: Cell<usize>,
    deallocations: Cell<usize>,
    live_bytes: Cell<usize>,
    remaining: Cell<Option<usize>>,
}

impl Stats {
    pub(crate) fn allocations(&self) -> usize {
        self.allocations.get()
    }

    pub(crate) fn deallocations(&self) -> usize {
        self.deallocations.get()
    }

    pub(crate) fn live_bytes(&self) -> usize {
        self.live_bytes.get()
    }
}

/// A counting, failure-injecting allocator backed by [`Global`].
///
/// The const parameters select the propagation flags, so tests can cover
/// every combination containers have to honor.
#[derive(Debug, Clone)]
pub(crate) struct TestAlloc<const POCCA: bool, const POCMA: bool, const POCS: bool> {
    id: u32,
    stats: Rc<Stats>,
}

/// Default propagation flags.
pub(crate) type CountingAllocator = TestAlloc<false, true, false>;
/// Propagates on copy-assignment, move-assignment and swap.
pub(crate) type PropagatingAllocator = TestAlloc<true, true, true>;
/// Never propagates.
pub(crate) type StickyAllocator = TestAlloc<false, false, false>;

impl<const POCCA: bool, const POCMA: bool, const POCS: bool> TestAlloc<POCCA, POCMA, POCS> {
    pub(crate) fn new() -> Self {
        Self::with_id(0)
    }

    pub(crate) fn with_id(id: u32) -> Self {
        TestAlloc {
            id,
            stats: Rc::new(Stats::default()),
        }
    }

    pub(crate) fn id(&self) -> u32 {
        self.id
    }

    pub(crate) fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Lets the next `n` allocations succeed and fails every one after.
    pub(crate) fn fail_after(&self, n: usize) {
        self.stats.remaining.set(Some(n));
    }

    pub(crate) fn never_fail(&self) {
        self.stats.remaining.set(None);
    }
}

unsafe impl<const POCCA: bool, const POCMA: bool, const POCS: bool> Allocator
    for TestAlloc<POCCA, POCMA, POCS>
{
    const PROPAGATE_ON_COPY_ASSIGNMENT: bool = POCCA;
    const PROPAGATE_ON_MOVE_ASSIGNMENT: bool = POCMA;
    const PROPAGATE_ON_SWAP: bool = POCS;

    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>> {
        match self.stats.remaining.get() {
            Some(0) => return Err(AllocError::failed(layout)),
            Some(n) => self.stats.remaining.set(Some(n - 1)),
            None => {}
        }

        let ptr = Global.allocate(layout)?;
        self.stats.allocations.set(self.stats.allocations.get() + 1);
        self.stats.live_bytes.set(self.stats.live_bytes.get() + layout.size());
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.stats.deallocations.set(self.stats.deallocations.get() + 1);
        self.stats.live_bytes.set(self.stats.live_bytes.get() - layout.size());
        Global.deallocate(ptr, layout)
    }

    fn is_equal(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.stats, &other.stats)
    }

    fn select_on_container_copy_construction(&self) -> Self
    where
        Self: Clone,
    {
        TestAlloc {
            id: self.id + 100,
            stats: self.stats.clone(),
        }
    }
}
