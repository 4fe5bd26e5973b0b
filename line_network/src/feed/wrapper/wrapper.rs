use crate::prelude::*;

pub trait ObjectWrapper<'a> {
    type Underlying: 'a;
    fn wrap(feed: &'a Feed, obj: &'a Self::Underlying) -> Self;
    fn raw(&self) -> &'a Self::Underlying;
}

pub trait WrapOption<'a, T: ObjectWrapper<'a>> {
    fn wrap(&self, feed: &'a Feed) -> Option<T>;
}

impl<'a, T: ObjectWrapper<'a>> WrapOption<'a, T> for Option<&'a T::Underlying> {
    fn wrap(&self, feed: &'a Feed) -> Option<T> {
        self.map(|x| T::wrap(feed, x))
    }
}

pub trait WrapResult<'a, T: ObjectWrapper<'a>, E> {
    fn wrap(self, feed: &'a Feed) -> Result<T, E>;
}

impl<'a, T: ObjectWrapper<'a>, E> WrapResult<'a, T, E> for Result<&'a T::Underlying, E> {
    fn wrap(self, feed: &'a Feed) -> Result<T, E> {
        Ok(T::wrap(feed, self?))
    }
}

pub struct WrappedObjectIterator<'a, T: ObjectWrapper<'a>, I: Iterator<Item = &'a T::Underlying>> {
    feed: &'a Feed,
    iter: I,
    _dummy: Option<&'a T>,
}

impl<'a, T: ObjectWrapper<'a>, I: Iterator<Item = &'a T::Underlying>>
    WrappedObjectIterator<'a, T, I>
{
    pub fn new(feed: &'a Feed, iter: I) -> Self {
        Self {
            feed,
            iter,
            _dummy: None,
        }
    }
}

impl<'a, T: ObjectWrapper<'a>, I: Iterator<Item = &'a T::Underlying>> Iterator
    for WrappedObjectIterator<'a, T, I>
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|obj| T::wrap(self.feed, obj))
    }
}

pub trait WrapIterator<'a, T: ObjectWrapper<'a>, I: Iterator<Item = &'a T::Underlying>> {
    fn wrap(self, feed: &'a Feed) -> WrappedObjectIterator<'a, T, I>;
}

impl<'a, T: ObjectWrapper<'a>, I: Iterator<Item = &'a T::Underlying>> WrapIterator<'a, T, I> for I {
    fn wrap(self, feed: &'a Feed) -> WrappedObjectIterator<'a, T, I> {
        WrappedObjectIterator::new(feed, self)
    }
}
