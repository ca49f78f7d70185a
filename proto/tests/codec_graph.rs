#[macro_use]
extern crate proptest;

mod utils;

use utils::*;
use xtrace_proto::graph::*;
use xtrace_wire::internal::*;

#[test]
fn default_messages_encode_to_nothing() {
    assert!(GraphDef::default().encode_to_vec().is_empty());
    assert!(NodeDef::default().encode_to_vec().is_empty());
    assert!(AttrValue::default().encode_to_vec().is_empty());
    assert!(TensorShapeProto::default().encode_to_vec().is_empty());
    assert!(VersionDef::default().encode_to_vec().is_empty());
}

#[test]
fn attrs_survive_a_graph_roundtrip() {
    let g = graph().node(
        node()
            .name("cache")
            .op("CacheDataset")
            .input("range")
            .input("filename")
            .device("/device:CPU:0")
            .attr("output_types", vec![DataType::DtInt64, DataType::DtString])
            .attr("output_shapes", vec![shape(&[]), shape(&[2, -1])])
            .attr("buffer_size", 1024i64)
            .attr("threshold", 0.5f32)
            .attr("container", "box")
            .attr("reshuffle", true)
            .attr("dtype", DataType::DtVariant)
            .attr("shape", shape(&[3])),
    );
    let decoded = GraphDef::decode(&*g.write_to_bytes().unwrap()).unwrap();
    assert_eq!(decoded, g);

    let n = &decoded.node[0];
    assert_eq!(n.input, ["range", "filename"]);
    assert_eq!(
        n.get_attr_list_data_type("output_types").unwrap(),
        [DataType::DtInt64, DataType::DtString]
    );
    let shapes = n.get_attr_list_shape("output_shapes").unwrap();
    assert_eq!(shapes[0].dim.len(), 0);
    assert_eq!(shapes[1].dim.iter().map(|d| d.size).collect::<Vec<_>>(), [2, -1]);
    assert_eq!(n.get_attr_int::<i64>("buffer_size").unwrap(), 1024);
    assert_eq!(n.get_attr_float::<f32>("threshold").unwrap(), 0.5);
    assert_eq!(n.get_attr_str("container").unwrap(), "box");
    assert_eq!(n.get_attr_raw_str("container").unwrap(), b"box");
    assert!(n.get_attr_bool("reshuffle").unwrap());
    assert_eq!(n.get_attr_data_type("dtype").unwrap(), DataType::DtVariant);
    assert_eq!(n.get_attr_shape("shape").unwrap(), shape(&[3]));
}

#[test]
fn missing_attr_errors_name_the_node() {
    let n = node().name("cache_1").op("CacheDataset");
    let err = n.get_attr_str("filename").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("cache_1"), "{message}");
    assert!(message.contains("CacheDataset"), "{message}");
    assert!(message.contains("filename"), "{message}");
    assert!(n.get_attr_opt_str("filename").unwrap().is_none());
    assert!(n.get_attr_opt_bool("filename").unwrap().is_none());
}

#[test]
fn int_attrs_check_the_target_width() {
    let n = node().attr("big", i64::MAX);
    assert_eq!(n.get_attr_int::<i64>("big").unwrap(), i64::MAX);
    assert!(n.get_attr_int::<i32>("big").is_err());
}

#[test]
fn unknown_data_type_values_are_rejected_at_access() {
    assert_eq!(DataType::from_i32(23), Some(DataType::DtUint64));
    assert_eq!(DataType::from_i32(24), None);

    let mut n = node();
    n.attr.insert("dtype".to_string(), AttrValue { value: Some(attr_value::Value::Type(99)) });
    assert!(n.get_attr_data_type("dtype").is_err());
}

#[test]
fn version_marks_roundtrip_packed() {
    let g = GraphDef {
        node: vec![],
        versions: Some(VersionDef { producer: 27, min_consumer: 0, bad_consumers: vec![-1, 26] }),
    };
    let bytes = g.encode_to_vec();
    assert_eq!(bytes.len(), g.encoded_len());
    assert_eq!(GraphDef::decode(&*bytes).unwrap(), g);
}

#[test]
fn float_attr_travels_as_fixed32() {
    let a = AttrValue::from(1.5f32);
    // key (field 4, fixed32) + 4 payload bytes
    assert_eq!(a.encode_to_vec(), [0x25, 0x00, 0x00, 0xc0, 0x3f]);
}

#[test]
fn save_and_reload_through_the_mmap_path() {
    setup_test_logger();
    let g = graph().node(node().name("n").op("NoOp"));
    let path = std::env::temp_dir().join(format!("xtrace-graph-{}.pb", std::process::id()));
    g.save_to(&path).unwrap();
    let reloaded = graphdef_for_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(reloaded, g);
}

proptest! {
    #[test]
    fn roundtrip_graph(g in graph_strat()) {
        let bytes = g.write_to_bytes().unwrap();
        prop_assert_eq!(GraphDef::decode(&*bytes).unwrap(), g);
    }

    #[test]
    fn roundtrip_attr_value(a in attr_value_strat()) {
        let bytes = a.encode_to_vec();
        prop_assert_eq!(bytes.len(), a.encoded_len());
        prop_assert_eq!(AttrValue::decode(&*bytes).unwrap(), a);
    }

    #[test]
    fn reencoding_map_free_graphs_is_stable(g in map_free_graph_strat()) {
        let bytes = g.encode_to_vec();
        let decoded = GraphDef::decode(&*bytes).unwrap();
        prop_assert_eq!(decoded.encode_to_vec(), bytes);
    }
}
