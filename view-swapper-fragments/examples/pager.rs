use std::cell::RefCell;
use std::rc::Rc;

use view_swapper::{Bundle, Container, ContainerId, ViewSwapper};
use view_swapper_fragments::{
    Fragment, FragmentManager, FragmentOp, FragmentPages, FragmentStateSwapperAdapter,
    FragmentTransaction, SwapperError,
};

#[derive(Debug)]
struct Page {
    title: &'static str,
    scroll: i64,
}

// A counter page; clones share the same page.
#[derive(Clone, Debug)]
struct Counter(Rc<RefCell<Page>>);

impl Fragment for Counter {
    fn set_menu_visibility(&mut self, _visible: bool) {}

    fn set_user_visible_hint(&mut self, _visible: bool) {}

    fn set_initial_saved_state(&mut self, state: Bundle) {
        self.0.borrow_mut().scroll = state.get_int("scroll").unwrap_or_default();
    }
}

#[derive(Default)]
struct Manager {
    live: Vec<Counter>,
}

impl FragmentManager for Manager {
    type Fragment = Counter;

    fn find_fragment_by_tag(&self, _tag: &str) -> Option<Counter> {
        None
    }

    fn commit_now_allowing_state_loss(&mut self, transaction: FragmentTransaction<Counter>) {
        for op in transaction.into_ops() {
            match op {
                FragmentOp::Add { fragment, .. } => self.live.push(fragment),
                FragmentOp::Remove(page) => self.live.retain(|p| !Rc::ptr_eq(&p.0, &page.0)),
                FragmentOp::Attach(_) | FragmentOp::Detach(_) => {}
            }
        }
    }

    fn save_fragment_instance_state(&mut self, fragment: &Counter) -> Option<Bundle> {
        let mut state = Bundle::new();
        state.put_int("scroll", fragment.0.borrow().scroll);
        Some(state)
    }

    fn put_fragment(&self, _bundle: &mut Bundle, _key: &str, _fragment: &Counter) {}

    fn get_fragment(&self, _bundle: &Bundle, _key: &str) -> Option<Counter> {
        None
    }
}

struct Titles(&'static [&'static str]);

impl FragmentPages<Counter> for Titles {
    fn count(&self) -> usize {
        self.0.len()
    }

    fn create(&mut self, position: usize) -> Result<Counter, SwapperError> {
        let title = self
            .0
            .get(position)
            .copied()
            .ok_or(SwapperError::UnknownPage { position })?;
        Ok(Counter(Rc::new(RefCell::new(Page { title, scroll: 0 }))))
    }
}

struct Frame;

impl Container for Frame {
    fn id(&self) -> Option<ContainerId> {
        Some(42)
    }

    fn is_laid_out(&self) -> bool {
        true
    }

    fn request_layout(&mut self) {}
}

fn main() {
    let mut swapper = ViewSwapper::new(Frame);
    swapper
        .set_adapter(Some(FragmentStateSwapperAdapter::new(
            Manager::default(),
            Titles(&["One", "Two", "Three"]),
        )))
        .expect("frame has an id");

    // Scroll the first page, then swap it away: only its state survives.
    if let Some(page) = swapper.item_at(0) {
        page.0.borrow_mut().scroll = 240;
    }
    swapper.show_item_at(1).expect("page exists");
    let live = swapper.adapter().map_or(0, |a| a.manager().live.len());
    println!("after swap: live pages={live}");

    // Coming back creates a new unit seeded with the saved scroll.
    swapper.show_item_at(0).expect("page exists");
    if let Some(page) = swapper.item_at(0) {
        let page = page.0.borrow();
        println!("back on {}: scroll={}", page.title, page.scroll);
    }
}
