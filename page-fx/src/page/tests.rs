use super::*;
use crate::avatar::Rect;
use crate::config::Preset;
use crate::host::memory::{MemoryPage, NodeId};

struct Site {
    year: NodeId,
    reveals: Vec<NodeId>,
    layers: Vec<NodeId>,
    background: NodeId,
    wrapper: NodeId,
    avatar: NodeId,
    trigger: NodeId,
    menu: NodeId,
    links: Vec<NodeId>,
    outside: NodeId,
}

fn site(reduced_motion: bool) -> (MemoryPage, Site) {
    let page = MemoryPage::new(2025).with_reduced_motion(reduced_motion);
    let body = page.add("body", None);

    let year = page.add("span", Some(body));
    page.set_id(year, "year");

    let reveals = (0..3)
        .map(|_| {
            let s = page.add("section", Some(body));
            page.add_class(s, "reveal")
        })
        .collect();

    let layers = (0..3)
        .map(|_| {
            let l = page.add("div", Some(body));
            page.add_class(l, "bg-layer")
        })
        .collect();
    let background = page.add("img", Some(body));
    page.set_id(background, "bgImage");

    let wrapper = page.add("div", Some(body));
    page.add_class(wrapper, "avatar-wrap");
    page.set_rect(wrapper, Rect::new(0.0, 0.0, 100.0, 100.0));
    let avatar = page.add("img", Some(wrapper));
    page.set_id(avatar, "avatar");

    let nav = page.add("nav", Some(body));
    let trigger = page.add("button", Some(nav));
    page.set_id(trigger, "pagesBtn");
    let menu = page.add("ul", Some(nav));
    page.set_id(menu, "pagesMenu");
    let links = (0..3)
        .map(|_| {
            let li = page.add("li", Some(menu));
            page.add("a", Some(li))
        })
        .collect();

    let outside = page.add("p", Some(body));

    (
        page,
        Site {
            year,
            reveals,
            layers,
            background,
            wrapper,
            avatar,
            trigger,
            menu,
            links,
            outside,
        },
    )
}

fn started(reduced_motion: bool) -> (PageInteractions<MemoryPage>, Site) {
    let (page, site) = site(reduced_motion);
    let fx = PageInteractions::start(page, PageConfig::default()).expect("init should succeed");
    (fx, site)
}

#[test]
fn init_writes_year() {
    let (fx, s) = started(false);
    assert_eq!(fx.page().text(s.year), "2025");
}

#[test]
fn init_observes_reveal_targets() {
    let (fx, s) = started(false);
    for r in &s.reveals {
        assert!(fx.page().is_observed(*r));
        assert!(!fx.page().has_class(*r, "is-visible"));
    }
    assert_eq!(fx.bindings().reveal_targets, 3);
}

#[test]
fn init_applies_first_parallax_frame() {
    let (page, s) = site(false);
    page.scroll_to(200.0);
    let fx = PageInteractions::start(page, PageConfig::default()).unwrap();
    assert_eq!(fx.page().transform(s.layers[0]), "translate3d(3px, -3px, 0) rotate(0.06deg)");
    assert_eq!(fx.page().transform(s.background), "translate3d(0, 2px, 0) scale(1.18)");
}

#[test]
fn init_sets_aria_expanded_false() {
    let (fx, s) = started(false);
    assert_eq!(fx.page().attribute(s.trigger, "aria-expanded").as_deref(), Some("false"));
    assert!(!fx.page().has_class(s.menu, "show"));
    assert_eq!(fx.menu_state(), Some(MenuState::Closed));
}

#[test]
fn scroll_updates_every_layer() {
    let (mut fx, s) = started(false);
    fx.page().scroll_to(400.0);
    fx.on_scroll().unwrap();
    assert_eq!(fx.page().transform(s.layers[0]), "translate3d(6px, -6px, 0) rotate(0.12deg)");
    assert_eq!(fx.page().transform(s.layers[1]), "translate3d(12px, -12px, 0) rotate(0.24deg)");
    assert_eq!(fx.page().transform(s.background), "translate3d(0, 4px, 0) scale(1.18)");
}

#[test]
fn scroll_is_idempotent() {
    let (mut fx, s) = started(false);
    fx.page().scroll_to(733.0);
    fx.on_scroll().unwrap();
    let first: Vec<String> = s.layers.iter().map(|l| fx.page().transform(*l)).collect();
    fx.on_scroll().unwrap();
    let second: Vec<String> = s.layers.iter().map(|l| fx.page().transform(*l)).collect();
    assert_eq!(first, second);
}

#[test]
fn scroll_back_to_top_restores_neutral() {
    let (mut fx, s) = started(false);
    fx.page().scroll_to(900.0);
    fx.on_scroll().unwrap();
    fx.page().scroll_to(0.0);
    fx.on_scroll().unwrap();
    assert_eq!(fx.page().transform(s.layers[2]), "translate3d(0px, 0px, 0) rotate(0deg)");
}

#[test]
fn reveal_is_one_shot() {
    let (mut fx, s) = started(false);
    let target = s.reveals[1];
    assert!(!fx.on_intersection(&target, false).unwrap());
    assert!(fx.page().is_observed(target));

    assert!(fx.on_intersection(&target, true).unwrap());
    assert!(fx.page().has_class(target, "is-visible"));
    assert!(!fx.page().is_observed(target));

    assert!(!fx.on_intersection(&target, true).unwrap());
    assert!(fx.page().has_class(target, "is-visible"));
    assert!(fx.page().is_observed(s.reveals[0]));
}

#[test]
fn intersection_for_unknown_element_ignored() {
    let (mut fx, s) = started(false);
    assert!(!fx.on_intersection(&s.outside, true).unwrap());
    assert!(!fx.page().has_class(s.outside, "is-visible"));
}

#[test]
fn avatar_center_and_leave() {
    let (mut fx, s) = started(false);
    fx.on_pointer_move(50.0, 50.0).unwrap();
    assert_eq!(fx.page().transform(s.avatar), "translate(0px, 0px) rotate(0deg)");
    fx.on_pointer_move(0.0, 100.0).unwrap();
    assert_eq!(fx.page().transform(s.avatar), "translate(-3px, 3px) rotate(-1deg)");
    fx.on_pointer_leave().unwrap();
    assert_eq!(fx.page().transform(s.avatar), "");
}

#[test]
fn collapsed_wrapper_leaves_avatar_alone() {
    let (page, s) = site(false);
    page.set_rect(s.wrapper, Rect::default());
    let mut fx = PageInteractions::start(page, PageConfig::default()).unwrap();
    fx.on_pointer_move(10.0, 10.0).unwrap();
    assert_eq!(fx.page().transform(s.avatar), "");
}

#[test]
fn subpage_falls_back_to_info_avatar() {
    let page = MemoryPage::new(2025);
    let wrapper = page.add("div", None);
    page.add_class(wrapper, "avatar-wrap");
    page.set_rect(wrapper, Rect::new(0.0, 0.0, 100.0, 100.0));
    let avatar = page.add("img", Some(wrapper));
    page.set_id(avatar, "avatar-info");

    let mut home = PageInteractions::start(page, PageConfig::preset(Preset::Home)).unwrap();
    assert!(!home.bindings().pointer);
    home.on_pointer_move(100.0, 50.0).unwrap();
    assert_eq!(home.page().transform(avatar), "");

    let page = MemoryPage::new(2025);
    let wrapper = page.add("div", None);
    page.add_class(wrapper, "avatar-wrap");
    page.set_rect(wrapper, Rect::new(0.0, 0.0, 100.0, 100.0));
    let avatar = page.add("img", Some(wrapper));
    page.set_id(avatar, "avatar-info");

    let mut sub = PageInteractions::start(page, PageConfig::preset(Preset::Subpage)).unwrap();
    assert!(sub.bindings().pointer);
    sub.on_pointer_move(100.0, 50.0).unwrap();
    assert_eq!(sub.page().transform(avatar), "translate(3px, 0px) rotate(1deg)");
}

#[test]
fn dropdown_click_toggles() {
    let (mut fx, s) = started(false);
    fx.on_trigger_click().unwrap();
    assert!(fx.page().has_class(s.menu, "show"));
    assert_eq!(fx.page().attribute(s.trigger, "aria-expanded").as_deref(), Some("true"));
    fx.on_trigger_click().unwrap();
    assert!(!fx.page().has_class(s.menu, "show"));
    assert_eq!(fx.page().attribute(s.trigger, "aria-expanded").as_deref(), Some("false"));
}

#[test]
fn outside_click_closes() {
    let (mut fx, s) = started(false);
    fx.on_trigger_click().unwrap();
    fx.on_document_click(Some(&s.outside)).unwrap();
    assert_eq!(fx.menu_state(), Some(MenuState::Closed));
    assert!(!fx.page().has_class(s.menu, "show"));
}

#[test]
fn clicks_on_trigger_or_menu_are_not_outside() {
    let (mut fx, s) = started(false);
    fx.on_trigger_click().unwrap();
    // The trigger's own click bubbles to the document too.
    fx.on_document_click(Some(&s.trigger)).unwrap();
    fx.on_document_click(Some(&s.links[2])).unwrap();
    fx.on_document_click(Some(&s.menu)).unwrap();
    assert_eq!(fx.menu_state(), Some(MenuState::Open));
}

#[test]
fn escape_closes_from_link() {
    let (mut fx, s) = started(false);
    fx.on_trigger_click().unwrap();
    fx.on_keydown("Escape", Some(&s.links[1])).unwrap();
    assert_eq!(fx.menu_state(), Some(MenuState::Closed));
    fx.on_keydown("Escape", None).unwrap();
    assert_eq!(fx.menu_state(), Some(MenuState::Closed));
}

#[test]
fn arrow_down_on_trigger_opens_and_focuses_first_link() {
    let (mut fx, s) = started(false);
    let out = fx.on_keydown("ArrowDown", Some(&s.trigger)).unwrap();
    assert!(out.prevent_default);
    assert_eq!(fx.menu_state(), Some(MenuState::Open));
    assert_eq!(fx.page().focused(), Some(s.links[0]));
    assert_eq!(fx.page().attribute(s.trigger, "aria-expanded").as_deref(), Some("true"));
}

#[test]
fn arrow_navigation_through_links() {
    let (mut fx, s) = started(false);
    fx.on_keydown("ArrowDown", Some(&s.trigger)).unwrap();
    fx.on_keydown("ArrowDown", Some(&s.links[0])).unwrap();
    assert_eq!(fx.page().focused(), Some(s.links[1]));
    fx.on_keydown("ArrowDown", Some(&s.links[1])).unwrap();
    assert_eq!(fx.page().focused(), Some(s.links[2]));

    // Last link: focus stays put.
    fx.on_keydown("ArrowDown", Some(&s.links[2])).unwrap();
    assert_eq!(fx.page().focused(), Some(s.links[2]));

    fx.on_keydown("ArrowUp", Some(&s.links[2])).unwrap();
    fx.on_keydown("ArrowUp", Some(&s.links[1])).unwrap();
    assert_eq!(fx.page().focused(), Some(s.links[0]));
    fx.on_keydown("ArrowUp", Some(&s.links[0])).unwrap();
    assert_eq!(fx.page().focused(), Some(s.trigger));
    assert_eq!(fx.menu_state(), Some(MenuState::Open));
}

#[test]
fn unrelated_keys_do_nothing() {
    let (mut fx, s) = started(false);
    let out = fx.on_keydown("ArrowDown", Some(&s.outside)).unwrap();
    assert!(!out.prevent_default);
    assert_eq!(fx.menu_state(), Some(MenuState::Closed));
    assert_eq!(fx.page().focused(), None);
}

#[test]
fn reduced_motion_freezes_parallax() {
    let (page, s) = site(true);
    page.scroll_to(300.0);
    let mut fx = PageInteractions::start(page, PageConfig::default()).unwrap();

    assert_eq!(fx.motion(), Motion::Reduced);
    assert_eq!(fx.scroll_binding(), ScrollBinding::Detached);
    assert!(!fx.bindings().scroll);
    for l in &s.layers {
        assert_eq!(fx.page().transform(*l), "");
    }
    assert_eq!(fx.page().transform(s.background), "scale(1.18)");

    let writes = fx.page().transform_writes();
    for offset in [0.0, 150.0, 4000.0] {
        fx.page().scroll_to(offset);
        fx.on_scroll().unwrap();
    }
    assert_eq!(fx.page().transform_writes(), writes);
    assert_eq!(fx.page().transform(s.background), "scale(1.18)");
}

#[test]
fn reduced_motion_keeps_other_behaviors() {
    let (mut fx, s) = started(true);
    fx.on_pointer_move(50.0, 50.0).unwrap();
    assert_eq!(fx.page().transform(s.avatar), "translate(0px, 0px) rotate(0deg)");
    assert!(fx.on_intersection(&s.reveals[0], true).unwrap());
    fx.on_trigger_click().unwrap();
    assert_eq!(fx.menu_state(), Some(MenuState::Open));
}

#[test]
fn motion_preference_sampled_once() {
    let (page, _s) = site(false);
    let mut fx = PageInteractions::init(page, PageConfig::default()).unwrap();
    assert_eq!(fx.motion(), Motion::Unknown);
    assert_eq!(fx.apply_motion_preference(), Motion::Full);
    assert_eq!(fx.apply_motion_preference(), Motion::Full);
    assert_eq!(fx.scroll_binding(), ScrollBinding::Attached);
}

#[test]
fn empty_page_is_inert() {
    let page = MemoryPage::new(2025);
    let mut fx = PageInteractions::start(page, PageConfig::default()).unwrap();
    assert_eq!(fx.bindings(), Bindings::default());
    assert_eq!(fx.menu_state(), None);
    fx.on_scroll().unwrap();
    fx.on_pointer_move(1.0, 1.0).unwrap();
    fx.on_pointer_leave().unwrap();
    fx.on_trigger_click().unwrap();
    fx.on_document_click(None).unwrap();
    assert_eq!(fx.on_keydown("Escape", None).unwrap(), KeyOutcome::default());
    assert_eq!(fx.page().transform_writes(), 0);
}

#[test]
fn dropdown_needs_both_elements() {
    let page = MemoryPage::new(2025);
    let trigger = page.add("button", None);
    page.set_id(trigger, "pagesBtn");
    let mut fx = PageInteractions::start(page, PageConfig::default()).unwrap();
    assert_eq!(fx.menu_state(), None);
    fx.on_trigger_click().unwrap();
    assert_eq!(fx.page().attribute(trigger, "aria-expanded"), None);
}

#[test]
fn invalid_config_rejected_at_init() {
    let (page, _s) = site(false);
    let config = PageConfig {
        reveal_threshold: 0.0,
        ..PageConfig::default()
    };
    assert!(PageInteractions::start(page, config).is_err());
}
