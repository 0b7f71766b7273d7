use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use view_swapper::{Container, SwapperAdapter, SwapperError, ViewSwapper};

/// Something a navigation shim can switch pages on.
///
/// Implemented for [`ViewSwapper`] and for the usual ways of sharing one: `&mut`, `Box` and
/// `Rc<RefCell<_>>`.
pub trait SwapperHandle {
    fn show_item_at(&mut self, position: usize) -> Result<(), SwapperError>;
}

impl<C, A> SwapperHandle for ViewSwapper<C, A>
where
    C: Container,
    A: SwapperAdapter<C>,
{
    fn show_item_at(&mut self, position: usize) -> Result<(), SwapperError> {
        ViewSwapper::show_item_at(self, position)
    }
}

impl<T: SwapperHandle + ?Sized> SwapperHandle for &mut T {
    fn show_item_at(&mut self, position: usize) -> Result<(), SwapperError> {
        (**self).show_item_at(position)
    }
}

impl<T: SwapperHandle + ?Sized> SwapperHandle for Box<T> {
    fn show_item_at(&mut self, position: usize) -> Result<(), SwapperError> {
        (**self).show_item_at(position)
    }
}

impl<T: SwapperHandle + ?Sized> SwapperHandle for Rc<RefCell<T>> {
    fn show_item_at(&mut self, position: usize) -> Result<(), SwapperError> {
        self.borrow_mut().show_item_at(position)
    }
}
