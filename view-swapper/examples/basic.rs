use std::collections::BTreeMap;

use view_swapper::{Container, ContainerId, ViewAdapter, ViewContainer, ViewId, ViewSwapper};

// A stand-in for the host framework's frame container.
#[derive(Default)]
struct Frame {
    children: BTreeMap<ViewId, String>,
    next: ViewId,
}

impl Container for Frame {
    fn id(&self) -> Option<ContainerId> {
        Some(1)
    }

    fn is_laid_out(&self) -> bool {
        true
    }

    fn request_layout(&mut self) {}
}

impl ViewContainer for Frame {
    type View = String;

    fn add_view(&mut self, view: String) -> ViewId {
        self.next += 1;
        self.children.insert(self.next, view);
        self.next
    }

    fn remove_view(&mut self, id: ViewId) -> Option<String> {
        self.children.remove(&id)
    }
}

fn label(page: &&str) -> String {
    format!("<{page}>")
}

fn main() {
    let mut swapper = ViewSwapper::new(Frame::default());
    swapper
        .set_adapter(Some(ViewAdapter::new(["home", "search", "settings"], label)))
        .expect("view adapters never fail to attach");
    println!("showing {:?}", swapper.container().children);

    swapper.show_item_at(2).expect("page exists");
    println!("showing {:?}", swapper.container().children);

    // Dropping the first page moves "settings" from position 2 to 1.
    swapper
        .update_adapter(|adapter| adapter.remove_page(0))
        .expect("reconciliation succeeds");
    println!(
        "current={} showing {:?}",
        swapper.current_item(),
        swapper.container().children
    );
}
