use fnv::FnvHasher;
use rand::{SeedableRng, XorShiftRng};
use std::{
    collections::HashSet,
    hash::{BuildHasherDefault, Hash}
};

pub type FnvHashSet<T> = HashSet<T, BuildHasherDefault<FnvHasher>>;

/// Construct a hash set with the specified capacity. The hashing algorithm is much faster than the default
/// on short keys such as integers and small strings.
/// Note it is less robust against security attacks on key collisions.
pub fn fnv_hashset<T: Hash + Eq>(capacity: usize) -> FnvHashSet<T> {
    let fnv = BuildHasherDefault::<FnvHasher>::default();
    HashSet::<T, _>::with_capacity_and_hasher(capacity, fnv)
}

/// A reproducible random source for maze generation and endpoint sampling.
///
/// XorShift must not be seeded with all zeros, so the upper two words are fixed non-zero.
pub fn seeded_rng(seed: u64) -> XorShiftRng {
    let low = seed as u32;
    let high = (seed >> 32) as u32;
    XorShiftRng::from_seed([low, high, 0x193a_6754, 0x9e37_79b9])
}

/// Seeded when a seed is given, otherwise seeded from the thread's random source.
pub fn rng_for(seed: Option<u64>) -> XorShiftRng {
    match seed {
        Some(s) => seeded_rng(s),
        None => rand::weak_rng(),
    }
}
