use std::cell::RefCell;
use std::rc::Rc;

use view_swapper::{Bundle, Container, ContainerId, ViewSwapper};
use view_swapper_fragments::{
    Fragment, FragmentManager, FragmentOp, FragmentPages, FragmentSwapperAdapter,
    FragmentTransaction, SwapperError,
};
use view_swapper_navigation::{
    BottomNavigation, Drawer, DrawerNavigation, MenuItemId, NavigationWidget,
};

// A page showing a single title.
#[derive(Clone, Debug)]
struct TextPage(Rc<RefCell<(&'static str, bool)>>);

impl Fragment for TextPage {
    fn set_menu_visibility(&mut self, visible: bool) {
        self.0.borrow_mut().1 = visible;
    }

    fn set_user_visible_hint(&mut self, _visible: bool) {}

    fn set_initial_saved_state(&mut self, _state: Bundle) {}
}

// Keeps every added page and which ones are attached.
#[derive(Default)]
struct Manager {
    pages: Vec<(Option<String>, TextPage, bool)>,
}

impl Manager {
    fn attached(&self) -> Vec<&'static str> {
        self.pages
            .iter()
            .filter(|(_, _, attached)| *attached)
            .map(|(_, page, _)| page.0.borrow().0)
            .collect()
    }

    fn set_attached(&mut self, page: &TextPage, attached: bool) {
        for entry in &mut self.pages {
            if Rc::ptr_eq(&entry.1.0, &page.0) {
                entry.2 = attached;
            }
        }
    }
}

impl FragmentManager for Manager {
    type Fragment = TextPage;

    fn find_fragment_by_tag(&self, tag: &str) -> Option<TextPage> {
        self.pages
            .iter()
            .find(|(t, _, _)| t.as_deref() == Some(tag))
            .map(|(_, page, _)| page.clone())
    }

    fn commit_now_allowing_state_loss(&mut self, transaction: FragmentTransaction<TextPage>) {
        for op in transaction.into_ops() {
            match op {
                FragmentOp::Add { fragment, tag, .. } => self.pages.push((tag, fragment, true)),
                FragmentOp::Attach(page) => self.set_attached(&page, true),
                FragmentOp::Detach(page) => self.set_attached(&page, false),
                FragmentOp::Remove(page) => self.pages.retain(|(_, p, _)| !Rc::ptr_eq(&p.0, &page.0)),
            }
        }
    }

    fn save_fragment_instance_state(&mut self, _fragment: &TextPage) -> Option<Bundle> {
        None
    }

    fn put_fragment(&self, _bundle: &mut Bundle, _key: &str, _fragment: &TextPage) {}

    fn get_fragment(&self, _bundle: &Bundle, _key: &str) -> Option<TextPage> {
        None
    }
}

// The three sample pages. Any other position is a configuration error.
struct SamplePages;

impl FragmentPages<TextPage> for SamplePages {
    fn count(&self) -> usize {
        3
    }

    fn create(&mut self, position: usize) -> Result<TextPage, SwapperError> {
        let title = match position {
            0 => "One",
            1 => "Two",
            2 => "Three",
            _ => return Err(SwapperError::UnknownPage { position }),
        };
        Ok(TextPage(Rc::new(RefCell::new((title, false)))))
    }
}

struct Frame;

impl Container for Frame {
    fn id(&self) -> Option<ContainerId> {
        Some(1)
    }

    fn is_laid_out(&self) -> bool {
        true
    }

    fn request_layout(&mut self) {}
}

#[derive(Default)]
struct DrawerLayout {
    open: bool,
}

impl Drawer for DrawerLayout {
    fn close_drawers(&mut self) {
        self.open = false;
    }
}

// A menu with the ids of the three pages, optionally hosted in a drawer.
struct Menu {
    checked: [bool; 3],
    drawer: Option<DrawerLayout>,
}

const MENU: [MenuItemId; 3] = [101, 102, 103];

impl NavigationWidget for Menu {
    fn menu_len(&self) -> usize {
        MENU.len()
    }

    fn menu_item_id(&self, index: usize) -> Option<MenuItemId> {
        MENU.get(index).copied()
    }

    fn set_item_checked(&mut self, index: usize, checked: bool) {
        self.checked[index] = checked;
    }

    fn parent_drawer(&mut self) -> Option<&mut dyn Drawer> {
        self.drawer.as_mut().map(|d| d as &mut dyn Drawer)
    }
}

type Swapper = ViewSwapper<Frame, FragmentSwapperAdapter<Manager, SamplePages>>;

fn swapper() -> Rc<RefCell<Swapper>> {
    let mut swapper = ViewSwapper::new(Frame);
    swapper
        .set_adapter(Some(FragmentSwapperAdapter::new(Manager::default(), SamplePages)))
        .expect("frame has an id");
    Rc::new(RefCell::new(swapper))
}

fn attached(swapper: &Rc<RefCell<Swapper>>) -> Vec<&'static str> {
    let swapper = swapper.borrow();
    swapper.adapter().map(|a| a.manager().attached()).unwrap_or_default()
}

fn main() {
    // Bottom bar: every known selection switches pages.
    let pages = swapper();
    let mut bottom = BottomNavigation::with_view_swapper(
        Menu {
            checked: [true, false, false],
            drawer: None,
        },
        Rc::clone(&pages),
    );
    bottom.set_on_item_selected_listener(Some(Box::new(|id| {
        println!("bottom bar selected {id}");
        false
    })));
    bottom.on_item_selected(103).expect("page exists");
    println!("bottom: attached={:?}", attached(&pages));

    // Survive a configuration change.
    let state = bottom.save_instance_state();
    let mut restored = BottomNavigation::with_view_swapper(
        Menu {
            checked: [false; 3],
            drawer: None,
        },
        Rc::clone(&pages),
    );
    restored.restore_instance_state(state);
    println!(
        "restored selection={} checked={:?}",
        restored.selected_position(),
        restored.widget().checked
    );

    // Drawer: the listener may claim a selection; otherwise the page switches and the drawer
    // closes.
    let pages = swapper();
    let mut drawer = DrawerNavigation::with_view_swapper(
        Menu {
            checked: [true, false, false],
            drawer: Some(DrawerLayout { open: true }),
        },
        Rc::clone(&pages),
    );
    drawer.set_on_item_selected_listener(Some(Box::new(|id| id == 103)));
    drawer.on_item_selected(103).expect("page exists");
    println!("drawer (claimed): attached={:?}", attached(&pages));
    drawer.on_item_selected(102).expect("page exists");
    println!(
        "drawer: attached={:?} open={:?}",
        attached(&pages),
        drawer.widget().drawer.as_ref().map(|d| d.open)
    );
}
