//! A fixed-capacity bump arena with bulk reset.
//!
//! Values are placed in a [`bumpalo::Bump`]. The arena charges
//! `size_of::<T>()` bytes against a byte budget for every allocation and
//! hands back a [`Handle`] made of the slot index and the arena generation
//! it was issued in. Individual values are never freed:
//! [`Arena::reset`] discards a whole generation at once, after which every
//! handle from that generation is rejected by [`Arena::get`].
//!
//! Running out of budget in [`Arena::alloc`] is fatal. Tree construction
//! relies on every node allocation succeeding, so a partial build is never
//! handed back to the caller.
//!
//! # Example
//!
//! ```
//! use rs_bhsim::arena::Arena;
//!
//! let mut arena: Arena<u64> = Arena::create(1024).expect("valid capacity");
//! let a = arena.alloc(7);
//! assert_eq!(*arena.get(a).unwrap(), 7);
//! assert_eq!(arena.used(), 8);
//!
//! arena.reset();
//! assert_eq!(arena.used(), 0);
//! assert!(arena.get(a).is_err()); // handle from the previous generation
//! ```
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;
use bumpalo::Bump;
use log::{debug, error};
use crate::errors::PhysicsError;

/// Generation-checked reference to a value stored in an [`Arena`].
pub struct Handle<T> {
    index: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Handle({}@gen{})", self.index, self.generation)
    }
}

/// A bump arena holding values of one type.
///
/// Values live in a [`bumpalo::Bump`] sized to the byte budget up front and
/// capped there with an allocation limit. `slots` maps handle indices to
/// the values of the current generation.
pub struct Arena<T> {
    bump: Bump,
    slots: Vec<NonNull<T>>,
    capacity: usize,
    used: usize,
    generation: u32,
}

impl<T: Copy> Arena<T> {
    /// Reserves room for `capacity_bytes` worth of values up front.
    ///
    /// # Errors
    ///
    /// Returns `PhysicsError::InvalidCapacity` if the budget cannot hold a single value.
    ///
    /// # Panics
    ///
    /// Panics if the allocator cannot satisfy the up-front reservation.
    pub fn create(capacity_bytes: usize) -> Result<Self, PhysicsError> {
        let slot_size = Self::slot_size();
        if capacity_bytes < slot_size {
            return Err(PhysicsError::InvalidCapacity);
        }
        let bump = match Bump::try_with_capacity(capacity_bytes) {
            Ok(bump) => bump,
            Err(e) => {
                error!("arena reservation of {} bytes failed: {}", capacity_bytes, e);
                panic!("arena reservation of {} bytes failed: {}", capacity_bytes, e);
            }
        };
        bump.set_allocation_limit(Some(capacity_bytes));
        debug!(
            "arena created: {} bytes ({} reserved), {} slots of {} bytes",
            capacity_bytes,
            bump.allocated_bytes(),
            capacity_bytes / slot_size,
            slot_size
        );
        Ok(Arena {
            bump,
            slots: Vec::with_capacity(capacity_bytes / slot_size),
            capacity: capacity_bytes,
            used: 0,
            generation: 0,
        })
    }

    /// Bytes charged per allocation.
    pub fn slot_size() -> usize {
        mem::size_of::<T>().max(1)
    }

    /// Places `value` in the arena.
    ///
    /// # Panics
    ///
    /// Panics when `used + size_of::<T>()` would exceed the capacity.
    pub fn alloc(&mut self, value: T) -> Handle<T> {
        match self.try_alloc(value) {
            Ok(handle) => handle,
            Err(e) => {
                error!("fatal arena allocation failure: {}", e);
                panic!("{}", e);
            }
        }
    }

    /// Like [`Arena::alloc`], but reports exhaustion instead of aborting.
    pub fn try_alloc(&mut self, value: T) -> Result<Handle<T>, PhysicsError> {
        let size = Self::slot_size();
        let exhausted = PhysicsError::ArenaExhausted {
            requested: size,
            used: self.used,
            capacity: self.capacity,
        };
        if self.used + size > self.capacity {
            return Err(exhausted);
        }
        let index = u32::try_from(self.slots.len()).map_err(|_| exhausted.clone())?;
        let slot = self.bump.try_alloc(value).map_err(|_| exhausted)?;
        self.slots.push(NonNull::from(slot));
        self.used += size;
        Ok(Handle {
            index,
            generation: self.generation,
            _marker: PhantomData,
        })
    }

    pub fn get(&self, handle: Handle<T>) -> Result<&T, PhysicsError> {
        self.check(handle)?;
        // SAFETY: the pointer came from `self.bump` in the current generation,
        // and `reset` clears `slots` before the bump memory is reused.
        Ok(unsafe { self.slots[handle.index()].as_ref() })
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Result<&mut T, PhysicsError> {
        self.check(handle)?;
        // SAFETY: as in `get`; `&mut self` makes this the only live reference.
        Ok(unsafe { self.slots[handle.index()].as_mut() })
    }

    fn check(&self, handle: Handle<T>) -> Result<(), PhysicsError> {
        if handle.generation != self.generation || handle.index() >= self.slots.len() {
            return Err(PhysicsError::StaleHandle {
                handle_generation: handle.generation,
                arena_generation: self.generation,
            });
        }
        Ok(())
    }

    /// Discards every value of the current generation at once and starts a
    /// new generation. Outstanding handles become stale.
    pub fn reset(&mut self) {
        debug!(
            "arena reset: releasing {} values ({} of {} bytes), generation {} -> {}",
            self.slots.len(),
            self.used,
            self.capacity,
            self.generation,
            self.generation.wrapping_add(1)
        );
        self.slots.clear();
        self.bump.reset();
        self.used = 0;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Gives the backing storage back. The arena cannot be used afterwards.
    pub fn release(self) {
        debug!(
            "arena released: {} bytes ({} reserved)",
            self.capacity,
            self.bump.allocated_bytes()
        );
    }

    /// Bytes charged against the budget in this generation.
    pub fn used(&self) -> usize {
        self.used
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes the backing bump holds from the system, chunk overhead included.
    pub fn reserved(&self) -> usize {
        self.bump.allocated_bytes()
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.used
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Values of the current generation in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        // SAFETY: see `get`.
        self.slots.iter().map(|slot| unsafe { slot.as_ref() })
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<T> fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.capacity)
            .field("used", &self.used)
            .field("generation", &self.generation)
            .finish()
    }
}
