//! Growth policy for the section and note tables.

/// Initial capacity of the section table of a new composition.
pub(crate) const SECTION_ALLOC_INIT: usize = 16;

/// Initial capacity of the note table of a new composition.
pub(crate) const NOTE_ALLOC_INIT: usize = 256;

/// The capacity that follows `current`: double it, but never go below
/// `initial` or above `max`.
pub(crate) const fn next_capacity(current: usize, initial: usize, max: usize) -> usize {
    let mut next = current.saturating_mul(2);
    if next < initial {
        next = initial;
    }
    if next > max {
        next = max;
    }
    next
}

/// Make room for one more element in `table`.
///
/// Capacity never shrinks. Callers check `table.len() < max` first.
pub(crate) fn reserve_one<T>(table: &mut Vec<T>, initial: usize, max: usize) {
    if table.len() < table.capacity() {
        return;
    }
    let capacity = next_capacity(table.capacity(), initial, max);
    #[cfg(feature = "tracing")]
    tracing::trace!(
        "growing {} table from {} to {capacity}",
        core::any::type_name::<T>(),
        table.capacity()
    );
    table.reserve_exact(capacity - table.len());
}

#[test]
fn doubling_policy() {
    use pretty_assertions::assert_eq;
    assert_eq!(next_capacity(0, 16, 65535), 16);
    assert_eq!(next_capacity(4, 16, 65535), 16);
    assert_eq!(next_capacity(16, 16, 65535), 32);
    assert_eq!(next_capacity(32768, 16, 65535), 65535);
    assert_eq!(next_capacity(1 << 19, 256, 1 << 20), 1 << 20);
}

#[test]
fn reserve_makes_room() {
    let mut table: Vec<u8> = Vec::new();
    reserve_one(&mut table, 4, 100);
    assert!(table.capacity() >= 4);

    while table.len() < table.capacity() {
        table.push(0);
    }
    let full = table.capacity();
    reserve_one(&mut table, 4, 100);
    assert!(table.capacity() >= (full * 2).min(100));
}
