//! Rendering of collections.
//!
//! Three capabilities cover every container shape:
//!
//! * in-order enumeration (`&C: IntoIterator`) for sequences, sets and maps,
//!   rendered in full;
//! * [`TopObservable`] for stacks and priority queues, where only the top
//!   element is shown;
//! * [`FrontBackObservable`] for queues, where only the two ends are shown.
//!
//! Hidden elements are never revealed by draining or cloning the container.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::fmt;

use crate::loggable::Loggable;

/// A container whose only directly observable element is its top.
pub trait TopObservable {
    type Item;

    fn top(&self) -> Option<&Self::Item>;

    fn len(&self) -> usize;
}

/// A container whose front and back are directly observable.
pub trait FrontBackObservable {
    type Item;

    fn front(&self) -> Option<&Self::Item>;

    fn back(&self) -> Option<&Self::Item>;

    fn len(&self) -> usize;
}

/// Writes `{e1, e2, ...}`.
pub fn write_sequence<'a, I, T>(out: &mut dyn fmt::Write, items: I) -> fmt::Result
where
    I: IntoIterator<Item = &'a T>,
    T: Loggable + ?Sized + 'a,
{
    out.write_char('{')?;
    for (idx, item) in items.into_iter().enumerate() {
        if idx > 0 {
            out.write_str(", ")?;
        }
        item.fmt_value(out)?;
    }
    out.write_char('}')
}

/// Writes `{k1: v1, k2: v2, ...}`.
pub fn write_map<'a, I, K, V>(out: &mut dyn fmt::Write, entries: I) -> fmt::Result
where
    I: IntoIterator<Item = (&'a K, &'a V)>,
    K: Loggable + ?Sized + 'a,
    V: Loggable + ?Sized + 'a,
{
    out.write_char('{')?;
    for (idx, (key, value)) in entries.into_iter().enumerate() {
        if idx > 0 {
            out.write_str(", ")?;
        }
        key.fmt_value(out)?;
        out.write_str(": ")?;
        value.fmt_value(out)?;
    }
    out.write_char('}')
}

/// Writes `{}`, `{top}` or `{top, ...}`.
pub fn write_top<C>(out: &mut dyn fmt::Write, container: &C) -> fmt::Result
where
    C: TopObservable + ?Sized,
    C::Item: Loggable,
{
    out.write_char('{')?;
    if let Some(top) = container.top() {
        top.fmt_value(out)?;
        if container.len() > 1 {
            out.write_str(", ...")?;
        }
    }
    out.write_char('}')
}

/// Writes `{}`, `{only}`, `{front, back}` or `{front, ..., back}`.
pub fn write_front_back<C>(out: &mut dyn fmt::Write, container: &C) -> fmt::Result
where
    C: FrontBackObservable + ?Sized,
    C::Item: Loggable,
{
    out.write_char('{')?;
    if let (Some(front), Some(back)) = (container.front(), container.back()) {
        front.fmt_value(out)?;
        match container.len() {
            0 | 1 => {}
            2 => {
                out.write_str(", ")?;
                back.fmt_value(out)?;
            }
            _ => {
                out.write_str(", ..., ")?;
                back.fmt_value(out)?;
            }
        }
    }
    out.write_char('}')
}

/// Last-in first-out adapter over a `Vec`.
///
/// Only the most recently pushed element is observable, which is also all
/// that gets rendered:
///
/// ```
/// # use exprlog::{render, Stack};
/// let mut s = Stack::new();
/// s.push(2);
/// s.push(1);
/// s.push(0);
/// assert_eq!(render(&s), "{0, ...}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn top(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    /// Pushes the items in iteration order; the last one ends up on top.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

/// First-in first-out adapter over a `VecDeque`.
///
/// Only both ends are observable:
///
/// ```
/// # use exprlog::{render, Queue};
/// let q: Queue<_> = (1..=4).collect();
/// assert_eq!(render(&q), "{1, ..., 4}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Appends `item` at the back.
    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Removes the front item.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn back(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> TopObservable for Stack<T> {
    type Item = T;

    fn top(&self) -> Option<&T> {
        Stack::top(self)
    }

    fn len(&self) -> usize {
        Stack::len(self)
    }
}

impl<T: Ord> TopObservable for BinaryHeap<T> {
    type Item = T;

    fn top(&self) -> Option<&T> {
        self.peek()
    }

    fn len(&self) -> usize {
        BinaryHeap::len(self)
    }
}

impl<T> FrontBackObservable for Queue<T> {
    type Item = T;

    fn front(&self) -> Option<&T> {
        Queue::front(self)
    }

    fn back(&self) -> Option<&T> {
        Queue::back(self)
    }

    fn len(&self) -> usize {
        Queue::len(self)
    }
}

macro_rules! impl_loggable_sequence {
    ($($name:literal => [$($gen:tt)*] $ty:ty),* $(,)?) => {
        $(
            impl<$($gen)*> Loggable for $ty {
                fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
                    write_sequence(out, self)
                }

                fn type_tag() -> Cow<'static, str> {
                    Cow::Owned(format!("{}<{}>", $name, T::type_tag()))
                }
            }
        )*
    };
}

impl_loggable_sequence! {
    "Vec" => [T: Loggable] Vec<T>,
    "VecDeque" => [T: Loggable] VecDeque<T>,
    "LinkedList" => [T: Loggable] LinkedList<T>,
    "BTreeSet" => [T: Loggable] BTreeSet<T>,
    "HashSet" => [T: Loggable, S] HashSet<T, S>,
}

impl<T: Loggable> Loggable for [T] {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write_sequence(out, self)
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Owned(format!("[{}]", T::type_tag()))
    }
}

impl<T: Loggable, const N: usize> Loggable for [T; N] {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write_sequence(out, self)
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Owned(format!("[{}; {}]", T::type_tag(), N))
    }
}

impl<K: Loggable, V: Loggable> Loggable for BTreeMap<K, V> {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write_map(out, self)
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Owned(format!("BTreeMap<{}, {}>", K::type_tag(), V::type_tag()))
    }
}

impl<K: Loggable, V: Loggable, S> Loggable for HashMap<K, V, S> {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write_map(out, self)
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Owned(format!("HashMap<{}, {}>", K::type_tag(), V::type_tag()))
    }
}

impl<T: Loggable> Loggable for Stack<T> {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write_top(out, self)
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Owned(format!("Stack<{}>", T::type_tag()))
    }
}

impl<T: Loggable + Ord> Loggable for BinaryHeap<T> {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write_top(out, self)
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Owned(format!("BinaryHeap<{}>", T::type_tag()))
    }
}

impl<T: Loggable> Loggable for Queue<T> {
    fn fmt_value(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write_front_back(out, self)
    }

    fn type_tag() -> Cow<'static, str> {
        Cow::Owned(format!("Queue<{}>", T::type_tag()))
    }
}
