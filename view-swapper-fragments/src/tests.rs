use crate::*;

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;

use view_swapper::{Bundle, Container, ContainerId, ItemPosition, SwapperAdapter, ViewSwapper};

#[derive(Debug)]
struct Record {
    serial: usize,
    title: &'static str,
    menu_visible: bool,
    user_visible: bool,
    initial_state: Option<Bundle>,
    scroll: i64,
}

#[derive(Clone, Debug)]
struct TestFragment(Rc<RefCell<Record>>);

impl TestFragment {
    fn new(serial: usize, title: &'static str) -> Self {
        Self(Rc::new(RefCell::new(Record {
            serial,
            title,
            menu_visible: false,
            user_visible: false,
            initial_state: None,
            scroll: 0,
        })))
    }

    fn serial(&self) -> usize {
        self.0.borrow().serial
    }

    fn title(&self) -> &'static str {
        self.0.borrow().title
    }

    fn is_visible(&self) -> bool {
        let r = self.0.borrow();
        r.menu_visible && r.user_visible
    }

    fn scroll_to(&self, scroll: i64) {
        self.0.borrow_mut().scroll = scroll;
    }

    fn initial_state(&self) -> Option<Bundle> {
        self.0.borrow().initial_state.clone()
    }

    fn same(&self, other: &TestFragment) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Fragment for TestFragment {
    fn set_menu_visibility(&mut self, visible: bool) {
        self.0.borrow_mut().menu_visible = visible;
    }

    fn set_user_visible_hint(&mut self, visible: bool) {
        self.0.borrow_mut().user_visible = visible;
    }

    fn set_initial_saved_state(&mut self, state: Bundle) {
        self.0.borrow_mut().initial_state = Some(state);
    }
}

#[derive(Debug)]
struct Managed {
    fragment: TestFragment,
    tag: Option<String>,
    container: ContainerId,
    attached: bool,
}

#[derive(Debug, Default)]
struct ManagerState {
    managed: Vec<Managed>,
    commits: usize,
}

impl ManagerState {
    fn set_attached(&mut self, fragment: &TestFragment, attached: bool) {
        if let Some(m) = self.managed.iter_mut().find(|m| m.fragment.same(fragment)) {
            m.attached = attached;
        }
    }
}

/// Shared like a host fragment manager, which outlives the adapters that use it.
#[derive(Clone, Debug, Default)]
struct TestManager(Rc<RefCell<ManagerState>>);

impl TestManager {
    fn commits(&self) -> usize {
        self.0.borrow().commits
    }

    fn managed_count(&self) -> usize {
        self.0.borrow().managed.len()
    }

    fn is_attached(&self, fragment: &TestFragment) -> Option<bool> {
        let state = self.0.borrow();
        let managed = state.managed.iter().find(|m| m.fragment.same(fragment))?;
        Some(managed.attached)
    }

    fn tags(&self) -> Vec<String> {
        self.0
            .borrow()
            .managed
            .iter()
            .filter_map(|m| m.tag.clone())
            .collect()
    }
}

impl FragmentManager for TestManager {
    type Fragment = TestFragment;

    fn find_fragment_by_tag(&self, tag: &str) -> Option<TestFragment> {
        let state = self.0.borrow();
        let managed = state
            .managed
            .iter()
            .find(|m| m.tag.as_deref() == Some(tag))?;
        Some(managed.fragment.clone())
    }

    fn commit_now_allowing_state_loss(&mut self, transaction: FragmentTransaction<TestFragment>) {
        let mut state = self.0.borrow_mut();
        state.commits += 1;
        for op in transaction.into_ops() {
            match op {
                FragmentOp::Add {
                    container,
                    fragment,
                    tag,
                } => state.managed.push(Managed {
                    fragment,
                    tag,
                    container,
                    attached: true,
                }),
                FragmentOp::Attach(f) => state.set_attached(&f, true),
                FragmentOp::Detach(f) => state.set_attached(&f, false),
                FragmentOp::Remove(f) => state.managed.retain(|m| !m.fragment.same(&f)),
            }
        }
    }

    fn save_fragment_instance_state(&mut self, fragment: &TestFragment) -> Option<Bundle> {
        let mut state = Bundle::new();
        state.put_str("title", fragment.title());
        state.put_int("scroll", fragment.0.borrow().scroll);
        Some(state)
    }

    fn put_fragment(&self, bundle: &mut Bundle, key: &str, fragment: &TestFragment) {
        bundle.put_int(key, fragment.serial() as i64);
    }

    fn get_fragment(&self, bundle: &Bundle, key: &str) -> Option<TestFragment> {
        let serial = usize::try_from(bundle.get_int(key)?).ok()?;
        let state = self.0.borrow();
        let managed = state
            .managed
            .iter()
            .find(|m| m.fragment.serial() == serial)?;
        Some(managed.fragment.clone())
    }
}

#[derive(Debug)]
struct Titles {
    titles: Vec<&'static str>,
    count: usize,
    created: usize,
    next_serial: usize,
    id_offset: u64,
    moves: BTreeMap<&'static str, ItemPosition>,
}

impl Titles {
    fn new(titles: &[&'static str]) -> Self {
        Self::starting_at(titles, 0)
    }

    fn starting_at(titles: &[&'static str], next_serial: usize) -> Self {
        Self {
            titles: titles.to_vec(),
            count: titles.len(),
            created: 0,
            next_serial,
            id_offset: 0,
            moves: BTreeMap::new(),
        }
    }
}

impl FragmentPages<TestFragment> for Titles {
    fn count(&self) -> usize {
        self.count
    }

    fn create(&mut self, position: usize) -> Result<TestFragment, SwapperError> {
        let title = *self
            .titles
            .get(position)
            .ok_or(SwapperError::UnknownPage { position })?;
        self.created += 1;
        self.next_serial += 1;
        Ok(TestFragment::new(self.next_serial, title))
    }

    fn item_id(&self, position: usize) -> u64 {
        self.id_offset + position as u64
    }

    fn item_position(&self, fragment: &TestFragment) -> ItemPosition {
        self.moves
            .get(fragment.title())
            .copied()
            .unwrap_or(ItemPosition::Unchanged)
    }
}

#[derive(Debug)]
struct Frame {
    id: Option<ContainerId>,
}

impl Container for Frame {
    fn id(&self) -> Option<ContainerId> {
        self.id
    }

    fn is_laid_out(&self) -> bool {
        true
    }

    fn request_layout(&mut self) {}
}

const FRAME: Frame = Frame { id: Some(7) };

type Tabs = FragmentSwapperAdapter<TestManager, Titles>;
type Pager = FragmentStateSwapperAdapter<TestManager, Titles>;

fn tabs(manager: &TestManager) -> ViewSwapper<Frame, Tabs> {
    let mut s = ViewSwapper::new(FRAME);
    let adapter = FragmentSwapperAdapter::new(manager.clone(), Titles::new(&["One", "Two", "Three"]));
    s.set_adapter(Some(adapter)).unwrap();
    s
}

fn pager(manager: &TestManager, titles: Titles) -> ViewSwapper<Frame, Pager> {
    let mut s = ViewSwapper::new(FRAME);
    s.set_adapter(Some(FragmentStateSwapperAdapter::new(manager.clone(), titles)))
        .unwrap();
    s
}

#[test]
fn attach_detach_adds_first_page_under_stable_name() {
    let manager = TestManager::default();
    let s = tabs(&manager);

    assert_eq!(manager.tags(), vec!["swapper:7:0".to_string()]);
    assert_eq!(manager.commits(), 1);
    assert_eq!(manager.0.borrow().managed[0].container, 7);
    let first = s.item_at(0).unwrap();
    assert!(first.is_visible());
    assert_eq!(manager.is_attached(first), Some(true));
}

#[test]
fn attach_detach_reuses_detached_unit() {
    let manager = TestManager::default();
    let mut s = tabs(&manager);
    let first = s.item_at(0).unwrap().clone();
    first.scroll_to(30);

    s.show_item_at(1).unwrap();
    assert_eq!(manager.is_attached(&first), Some(false));
    assert!(!first.is_visible());
    let second = s.item_at(1).unwrap().clone();

    s.show_item_at(0).unwrap();
    let again = s.item_at(0).unwrap();
    assert!(again.same(&first));
    assert_eq!(again.0.borrow().scroll, 30);
    assert!(again.is_visible());
    assert_eq!(manager.is_attached(&first), Some(true));
    assert_eq!(manager.is_attached(&second), Some(false));
    assert_eq!(s.adapter().unwrap().pages().created, 2);
    assert_eq!(manager.managed_count(), 2);
}

#[test]
fn attach_detach_reshow_same_position_does_not_recreate() {
    let manager = TestManager::default();
    let mut s = tabs(&manager);
    let first = s.item_at(0).unwrap().clone();

    s.show_item_at(0).unwrap();

    assert!(s.item_at(0).unwrap().same(&first));
    assert_eq!(s.adapter().unwrap().pages().created, 1);
    assert_eq!(manager.is_attached(&first), Some(true));
}

#[test]
fn attach_detach_uses_custom_item_ids() {
    let manager = TestManager::default();
    let mut titles = Titles::new(&["One", "Two"]);
    titles.id_offset = 100;
    let mut s = ViewSwapper::new(FRAME);
    s.set_adapter(Some(FragmentSwapperAdapter::new(manager.clone(), titles)))
        .unwrap();
    s.show_item_at(1).unwrap();

    assert_eq!(
        manager.tags(),
        vec!["swapper:7:100".to_string(), "swapper:7:101".to_string()]
    );
}

#[test]
fn attach_detach_requires_container_id() {
    let manager = TestManager::default();
    let mut s = ViewSwapper::new(Frame { id: None });
    let err = s
        .set_adapter(Some(FragmentSwapperAdapter::new(
            manager.clone(),
            Titles::new(&["One"]),
        )))
        .unwrap_err();

    assert_eq!(
        err,
        SwapperError::MissingContainerId {
            adapter: "FragmentSwapperAdapter"
        }
    );
    assert_eq!(manager.managed_count(), 0);
    assert_eq!(manager.commits(), 0);
}

#[test]
fn adapter_that_never_showed_a_page_is_handed_back() {
    let manager = TestManager::default();
    let mut s = ViewSwapper::new(Frame { id: None });
    assert!(
        s.set_adapter(Some(FragmentSwapperAdapter::new(
            manager.clone(),
            Titles::new(&["One"]),
        )))
        .is_err()
    );
    assert!(s.adapter().is_some());

    let previous = s.set_adapter(None).unwrap();
    assert!(previous.is_some());
    assert!(s.adapter().is_none());
    assert!(s.items().is_empty());
    assert_eq!(manager.commits(), 0);
}

#[test]
fn failed_teardown_keeps_the_adapter_attached() {
    let manager = TestManager::default();
    let mut s = tabs(&manager);
    let first = s.item_at(0).unwrap().clone();
    s.container_mut().id = None;

    assert_eq!(
        s.set_adapter(None).unwrap_err(),
        SwapperError::MissingContainerId {
            adapter: "FragmentSwapperAdapter"
        }
    );
    assert!(s.adapter().is_some());
    assert!(s.item_at(0).unwrap().same(&first));
    assert_eq!(s.items().len(), 3);
    assert_eq!(manager.is_attached(&first), Some(true));

    s.container_mut().id = Some(7);
    assert!(s.take_adapter().unwrap().is_some());
    assert_eq!(manager.is_attached(&first), Some(false));
    assert!(s.items().is_empty());
}

#[test]
fn unknown_page_fails_the_current_operation() {
    let manager = TestManager::default();
    let mut titles = Titles::new(&["One"]);
    titles.count = 2;
    let mut s = ViewSwapper::new(FRAME);
    s.set_adapter(Some(FragmentSwapperAdapter::new(manager.clone(), titles)))
        .unwrap();

    assert_eq!(
        s.show_item_at(1).unwrap_err(),
        SwapperError::UnknownPage { position: 1 }
    );
}

#[test]
fn attach_detach_follows_moved_pages() {
    let manager = TestManager::default();
    let mut s = tabs(&manager);
    s.show_item_at(1).unwrap();

    s.update_adapter(|a| {
        a.pages_mut().moves.insert("Two", ItemPosition::Moved(2));
        SwapperAdapter::<Frame>::notify_data_set_changed(&*a);
    })
    .unwrap();

    assert_eq!(s.current_item(), 2);
    assert_eq!(s.item_at(2).map(TestFragment::title), Some("Two"));
}

#[test]
fn state_pager_removes_pages_and_remembers_state() {
    let manager = TestManager::default();
    let mut s = pager(&manager, Titles::new(&["One", "Two", "Three"]));
    s.show_item_at(1).unwrap();
    let old = s.item_at(1).unwrap().clone();
    old.scroll_to(55);

    s.show_item_at(2).unwrap();
    assert_eq!(manager.is_attached(&old), None);
    let saved = s.adapter().unwrap().saved_state(1).cloned().unwrap();
    assert_eq!(saved.get_int("scroll"), Some(55));
    assert!(s.adapter().unwrap().fragment(1).is_none());

    s.show_item_at(1).unwrap();
    let fresh = s.item_at(1).unwrap();
    assert!(!fresh.same(&old));
    assert_eq!(fresh.initial_state(), Some(saved));
    assert!(fresh.is_visible());
    assert_eq!(manager.managed_count(), 1);
}

#[test]
fn state_pager_returns_live_unit_without_a_transaction() {
    let manager = TestManager::default();
    let mut container = FRAME;
    let mut adapter = FragmentStateSwapperAdapter::new(manager.clone(), Titles::new(&["One"]));

    let first = SwapperAdapter::<Frame>::instantiate_item(&mut adapter, &mut container, 0).unwrap();
    SwapperAdapter::<Frame>::finish_update(&mut adapter, &mut container);
    let commits = manager.commits();

    let again = SwapperAdapter::<Frame>::instantiate_item(&mut adapter, &mut container, 0).unwrap();
    SwapperAdapter::<Frame>::finish_update(&mut adapter, &mut container);
    assert!(again.same(&first));
    assert_eq!(manager.commits(), commits);
    assert_eq!(adapter.pages().created, 1);
}

#[test]
fn state_pager_survives_configuration_change() {
    let manager = TestManager::default();
    let mut s = pager(&manager, Titles::new(&["One", "Two", "Three"]));
    s.show_item_at(1).unwrap();
    s.show_item_at(2).unwrap();
    let mut live = s.item_at(2).unwrap().clone();
    let saved_one = s.adapter().unwrap().saved_state(1).cloned();
    let bundle = s.save_instance_state();

    // The old screen goes away; the manager keeps the live unit.
    drop(s);
    live.set_menu_visibility(false);

    let mut restored = ViewSwapper::new(FRAME);
    restored.restore_instance_state(bundle).unwrap();
    restored
        .set_adapter(Some(FragmentStateSwapperAdapter::new(
            manager.clone(),
            Titles::starting_at(&["One", "Two", "Three"], 100),
        )))
        .unwrap();

    assert_eq!(restored.current_item(), 2);
    let adapter = restored.adapter().unwrap();
    assert!(adapter.fragment(2).unwrap().same(&live));
    assert!(live.is_visible());
    assert_eq!(adapter.saved_state(1).cloned(), saved_one);
    assert!(adapter.saved_state(0).is_some());
    assert_eq!(adapter.pages().created, 0);
}

#[test]
fn state_pager_save_state_is_empty_before_anything_happens() {
    let manager = TestManager::default();
    let adapter = FragmentStateSwapperAdapter::new(manager, Titles::new(&["One"]));
    assert_eq!(SwapperAdapter::<Frame>::save_state(&adapter), None);
}

#[test]
fn state_pager_restore_skips_malformed_and_stale_keys() {
    let manager = TestManager::default();
    let mut adapter = FragmentStateSwapperAdapter::new(manager, Titles::new(&["One", "Two"]));

    let mut state = Bundle::new();
    state.put_int("fx", 1);
    state.put_int("f1", 999);
    state.put_bool("other", true);
    state.put_bundle_list("states", vec![None, Some(Bundle::new())]);
    SwapperAdapter::<Frame>::restore_state(&mut adapter, state);

    assert!(adapter.fragment(1).is_none());
    assert!(adapter.saved_state(0).is_none());
    assert_eq!(adapter.saved_state(1), Some(&Bundle::new()));
}

#[test]
fn state_pager_requires_container_id_to_add() {
    let manager = TestManager::default();
    let mut container = Frame { id: None };
    let mut adapter = FragmentStateSwapperAdapter::new(manager, Titles::new(&["One"]));

    assert_eq!(
        SwapperAdapter::<Frame>::instantiate_item(&mut adapter, &mut container, 0).unwrap_err(),
        SwapperError::MissingContainerId {
            adapter: "FragmentStateSwapperAdapter"
        }
    );
}
