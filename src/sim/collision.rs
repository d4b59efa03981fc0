//! Overlap queries used by the orchestrator's resolution pass
//!
//! Two flavours: non-consuming queries hand out mutable references to the
//! entities that overlap a region, consuming queries remove them from their
//! collection.

use super::aabb::Aabb;

/// Every item whose box overlaps `region`, in collection order
pub fn overlapping_mut<'a, T, F>(
    items: &'a mut [T],
    region: Aabb,
    bounds: F,
) -> impl Iterator<Item = &'a mut T> + 'a
where
    F: Fn(&T) -> &Aabb + 'a,
{
    items
        .iter_mut()
        .filter(move |item| bounds(&**item).intersects(&region))
}

/// The first item accepted by `pred` whose box overlaps `region`
pub fn first_overlap_mut<'a, T, F, P>(
    items: &'a mut [T],
    region: &Aabb,
    bounds: F,
    pred: P,
) -> Option<&'a mut T>
where
    F: Fn(&T) -> &Aabb,
    P: Fn(&T) -> bool,
{
    items
        .iter_mut()
        .find(|item| pred(&**item) && bounds(&**item).intersects(region))
}

/// Remove and return every item matching `pred`; the rest keep their order
pub fn drain_where<T, P>(items: &mut Vec<T>, mut pred: P) -> Vec<T>
where
    P: FnMut(&T) -> bool,
{
    let (taken, kept): (Vec<T>, Vec<T>) = std::mem::take(items).into_iter().partition(|item| pred(item));
    *items = kept;
    taken
}
