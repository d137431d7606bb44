mod support;

use std::sync::Arc;

use planarc::{
    Cell, Curve, Layer, LayerStack, Multilayer, PORT_OUT, Pattern, Pose, Taper,
    traits::{Ported, TransformOps},
};

use crate::support::{approx_eq, bounding_box};

fn strip() -> Pattern {
    Curve::straight(3.0)
        .unwrap()
        .path(&Taper::constant(1.0))
        .unwrap()
}

#[test]
fn multilayer_moves_as_one_object() {
    let mut device = Multilayer::from_pattern(strip(), "ridge_si");
    device.add(Pattern::rectangle(1.0, 1.0).unwrap(), "metal_1");
    assert_eq!(device.stack.len(), 2);

    let before = device.port(PORT_OUT).unwrap();
    device.translate(5.0, 1.0);
    let after = device.port(PORT_OUT).unwrap();
    assert!(approx_eq(after.x, before.x + 5.0, 1e-12));
    assert!(approx_eq(after.y, before.y + 1.0, 1e-12));
    assert!(approx_eq(after.angle, before.angle, 1e-12));

    // both stacked patterns moved, including their own ports
    let bb = bounding_box(&device);
    assert!(approx_eq(bb[0], 5.0, 1e-9));
    let strip_port = device.stack[0].0.port(PORT_OUT).unwrap();
    assert!(approx_eq(strip_port.x, after.x, 1e-9));
}

#[test]
fn layer_boundaries_group_by_layer() {
    let mut device = Multilayer::from_pattern(strip(), "ridge_si");
    device.add(Pattern::rectangle(1.0, 1.0).unwrap(), "ridge_si");
    device.add(Pattern::rectangle(1.0, 1.0).unwrap(), "metal_1");

    let per_layer = device.layer_boundaries();
    assert_eq!(per_layer.len(), 2);
    assert_eq!(per_layer[&Layer::from("ridge_si")].0.len(), 2);
    assert_eq!(per_layer[&Layer::from("metal_1")].0.len(), 1);
}

#[test]
fn extrusion_follows_stack_order() {
    let mut device = Multilayer::from_pattern(strip(), "ridge_si");
    device.add(Pattern::rectangle(1.0, 1.0).unwrap(), "metal_1");

    // stack order is the processing order, not the multilayer's
    let stack = LayerStack::new()
        .with_layer("metal_1", 1.0, 1.5)
        .with_layer("ridge_si", 0.0, 0.22);
    let records = device.extrusion(&stack).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].layer, Layer::from("metal_1"));
    assert!(approx_eq(records[0].height(), 0.5, 1e-12));
    assert_eq!(records[1].layer, Layer::from("ridge_si"));
    assert!(approx_eq(records[1].zmax, 0.22, 1e-12));
}

#[test]
fn extrusion_requires_a_zrange_for_every_layer() {
    let device = Multilayer::from_pattern(strip(), "clad");
    let stack = LayerStack::new().with_layer("ridge_si", 0.0, 0.22);
    assert!(device.extrusion(&stack).is_err());
}

#[test]
fn extrusion_rejects_inverted_zranges() {
    let device = Multilayer::from_pattern(strip(), "ridge_si");
    let stack = LayerStack::new().with_layer("ridge_si", 0.3, 0.1);
    assert!(device.extrusion(&stack).is_err());
}

#[test]
fn cell_flatten_applies_placements() {
    let mut child = Cell::new("unit_square");
    child.add(&Pattern::rectangle(1.0, 1.0).unwrap(), "metal_1");
    let child = Arc::new(child);

    let mut parent = Cell::new("pair");
    parent.place(child.clone(), Pose::new(10.0, 0.0, 90.0));
    parent.place(child, Pose::new(0.0, 0.0, 0.0));

    let flat = parent.flatten();
    assert_eq!(flat.len(), 2);

    // rotated placement: unit square spun 90° about the origin, then moved
    let rect = geo::BoundingRect::bounding_rect(&flat[0].0).unwrap();
    assert!(approx_eq(rect.min().x, 9.0, 1e-9));
    assert!(approx_eq(rect.min().y, 0.0, 1e-9));
    assert!(approx_eq(rect.max().x, 10.0, 1e-9));
    assert!(approx_eq(rect.max().y, 1.0, 1e-9));
}

#[test]
fn cells_snapshot_pattern_geometry() {
    let pattern = strip();
    let mut cell = Cell::new("snapshot");
    cell.add(&pattern, "ridge_si");

    // mutating the source pattern later must not change the cell
    let mut pattern = pattern;
    pattern.translate(100.0, 0.0);
    let flat = cell.flatten();
    let rect = geo::BoundingRect::bounding_rect(&flat[0].0).unwrap();
    assert!(approx_eq(rect.min().x, 0.0, 1e-9));
}

#[test]
fn multilayer_to_cell_keeps_ports_and_layers() {
    let mut device = Multilayer::from_pattern(strip(), "ridge_si");
    device.add(Pattern::rectangle(1.0, 1.0).unwrap(), "metal_1");
    let cell = device.to_cell("device");
    assert_eq!(cell.name, "device");
    assert_eq!(cell.elements.len(), 2);
    assert_eq!(cell.ports.len(), device.ports.len());
}
