use bt_tree::{NodeKind, Template, TemplateError};

#[test]
fn new_template_has_exactly_one_root() {
    let template = Template::new("patrol");
    assert_eq!(template.len(), 1);

    let root = template.node(template.root()).unwrap();
    assert!(matches!(root.kind(), NodeKind::Root));
    assert!(root.children().is_empty());
}

#[test]
fn adding_a_second_root_is_rejected() {
    let mut template = Template::new("patrol");
    assert_eq!(template.add_node(NodeKind::Root), Err(TemplateError::RootIsFixed));
}

#[test]
fn removing_the_root_is_rejected() {
    let mut template = Template::new("patrol");
    let root = template.root();
    assert_eq!(template.remove_node(root), Err(TemplateError::RootIsFixed));
}

#[test]
fn connect_and_disconnect_roundtrip() {
    let mut template = Template::new("patrol");
    let seq = template.add_node(NodeKind::Sequence).unwrap();
    let wait = template.add_node(NodeKind::Wait { seconds: 1.0 }).unwrap();

    template.connect(template.root(), seq).unwrap();
    template.connect(seq, wait).unwrap();
    assert_eq!(template.parent_of(seq), Some(template.root()));
    assert_eq!(template.parent_of(wait), Some(seq));
    assert_eq!(template.node(seq).unwrap().children(), &[wait][..]);

    template.disconnect(seq, wait).unwrap();
    assert_eq!(template.parent_of(wait), None);
    assert!(template.node(seq).unwrap().children().is_empty());
}

#[test]
fn decorators_take_at_most_one_child() {
    let mut template = Template::new("patrol");
    let inverter = template.add_node(NodeKind::Inverter).unwrap();
    let a = template.add_node(NodeKind::Log { message: "a".into() }).unwrap();
    let b = template.add_node(NodeKind::Log { message: "b".into() }).unwrap();

    template.connect(inverter, a).unwrap();
    assert_eq!(
        template.connect(inverter, b),
        Err(TemplateError::ChildLimit { parent: inverter })
    );

    template.connect(template.root(), inverter).unwrap();
    assert_eq!(
        template.connect(template.root(), b),
        Err(TemplateError::ChildLimit { parent: template.root() })
    );
}

#[test]
fn leaves_take_no_children() {
    let mut template = Template::new("patrol");
    let wait = template.add_node(NodeKind::Wait { seconds: 1.0 }).unwrap();
    let log = template.add_node(NodeKind::Log { message: "hi".into() }).unwrap();

    assert_eq!(
        template.connect(wait, log),
        Err(TemplateError::ChildLimit { parent: wait })
    );
}

#[test]
fn shared_subtrees_are_rejected() {
    let mut template = Template::new("patrol");
    let first = template.add_node(NodeKind::Sequence).unwrap();
    let second = template.add_node(NodeKind::Selector).unwrap();
    let shared = template.add_node(NodeKind::Log { message: "hi".into() }).unwrap();

    template.connect(first, shared).unwrap();
    assert_eq!(
        template.connect(second, shared),
        Err(TemplateError::AlreadyParented { child: shared })
    );
}

#[test]
fn cycles_are_rejected() {
    let mut template = Template::new("patrol");
    let outer = template.add_node(NodeKind::Sequence).unwrap();
    let inner = template.add_node(NodeKind::Selector).unwrap();

    template.connect(outer, inner).unwrap();
    assert_eq!(
        template.connect(inner, outer),
        Err(TemplateError::WouldCycle { parent: inner, child: outer })
    );
    assert_eq!(
        template.connect(outer, outer),
        Err(TemplateError::WouldCycle { parent: outer, child: outer })
    );
}

#[test]
fn the_root_cannot_become_a_child() {
    let mut template = Template::new("patrol");
    let seq = template.add_node(NodeKind::Sequence).unwrap();

    assert_eq!(
        template.connect(seq, template.root()),
        Err(TemplateError::RootAsChild)
    );
}

#[test]
fn removing_a_node_detaches_it_and_orphans_its_children() {
    let mut template = Template::new("patrol");
    let seq = template.add_node(NodeKind::Sequence).unwrap();
    let wait = template.add_node(NodeKind::Wait { seconds: 1.0 }).unwrap();
    template.connect(template.root(), seq).unwrap();
    template.connect(seq, wait).unwrap();

    template.remove_node(seq).unwrap();
    assert!(template.node(seq).is_none());
    assert!(template.node(template.root()).unwrap().children().is_empty());
    // The orphan stays in the arena as a detached subtree.
    assert!(template.node(wait).is_some());
    assert_eq!(template.parent_of(wait), None);
}

#[test]
fn operations_on_unknown_ids_are_rejected() {
    let mut template = Template::new("patrol");
    let seq = template.add_node(NodeKind::Sequence).unwrap();
    // A stale id: issued once, then removed.
    let ghost = template.add_node(NodeKind::Sequence).unwrap();
    template.remove_node(ghost).unwrap();

    assert_eq!(template.connect(seq, ghost), Err(TemplateError::UnknownNode(ghost)));
    assert_eq!(template.connect(ghost, seq), Err(TemplateError::UnknownNode(ghost)));
    assert_eq!(template.remove_node(ghost), Err(TemplateError::UnknownNode(ghost)));
    assert_eq!(
        template.disconnect(seq, ghost),
        Err(TemplateError::UnknownNode(ghost))
    );
}

#[test]
fn disconnecting_a_missing_edge_is_rejected() {
    let mut template = Template::new("patrol");
    let seq = template.add_node(NodeKind::Sequence).unwrap();
    let wait = template.add_node(NodeKind::Wait { seconds: 1.0 }).unwrap();

    assert_eq!(
        template.disconnect(seq, wait),
        Err(TemplateError::NotConnected { parent: seq, child: wait })
    );
}

#[test]
fn validate_accepts_authored_templates() {
    let mut template = Template::new("patrol");
    let seq = template.add_node(NodeKind::Sequence).unwrap();
    let wait = template.add_node(NodeKind::Wait { seconds: 1.0 }).unwrap();
    let idle = template
        .add_node(NodeKind::SetFlag { flag: "isIdle".into(), value: true })
        .unwrap();
    template.connect(template.root(), seq).unwrap();
    template.connect(seq, wait).unwrap();
    template.connect(seq, idle).unwrap();

    assert_eq!(template.validate(), Ok(()));
}

#[test]
fn validate_catches_a_variant_swap_that_breaks_arity() {
    let mut template = Template::new("patrol");
    let seq = template.add_node(NodeKind::Sequence).unwrap();
    let a = template.add_node(NodeKind::Log { message: "a".into() }).unwrap();
    let b = template.add_node(NodeKind::Log { message: "b".into() }).unwrap();
    template.connect(template.root(), seq).unwrap();
    template.connect(seq, a).unwrap();
    template.connect(seq, b).unwrap();

    *template.node_mut(seq).unwrap().kind_mut() = NodeKind::Wait { seconds: 1.0 };
    assert_eq!(
        template.validate(),
        Err(TemplateError::ChildLimit { parent: seq })
    );
}

#[test]
fn node_names_default_to_the_kind_label_and_stay_editable() {
    let mut template = Template::new("patrol");
    let wait = template.add_node(NodeKind::Wait { seconds: 2.0 }).unwrap();
    assert_eq!(template.node(wait).unwrap().name, "Wait");

    template.node_mut(wait).unwrap().name = "cooldown".to_string();
    assert_eq!(template.node(wait).unwrap().name, "cooldown");
}
