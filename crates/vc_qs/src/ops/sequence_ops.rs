use core::iter::FusedIterator;

use crate::Reflect;

/// Item access of a sequence.
pub trait Sequence: Reflect {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<&dyn Reflect>;
}

impl dyn Sequence {
    /// Iterates the items in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_qs::{Reflect, ops::Sequence};
    ///
    /// let tags = vec![String::from("a"), String::from("b")];
    /// let seq = tags.reflect_ref().as_sequence().unwrap();
    /// let items: Vec<_> = seq
    ///     .iter()
    ///     .filter_map(|item| item.downcast_ref::<String>())
    ///     .collect();
    /// assert_eq!(items, ["a", "b"]);
    /// ```
    #[inline]
    pub fn iter(&self) -> SequenceIter<'_> {
        SequenceIter {
            sequence: self,
            index: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Iterator over the items of a [`Sequence`].
pub struct SequenceIter<'a> {
    sequence: &'a dyn Sequence,
    index: usize,
}

impl<'a> Iterator for SequenceIter<'a> {
    type Item = &'a dyn Reflect;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.sequence.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.sequence.len().saturating_sub(self.index);
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for SequenceIter<'_> {}
impl FusedIterator for SequenceIter<'_> {}
