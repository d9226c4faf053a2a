//! Block reader tests on logrotate-style inputs

use conf_toolkit::{Block, ConfigReader, Section};
use serde_json::json;

#[test]
fn test_globals_and_host_block() {
    let text = "verbose = true\nhost1.example.org {\n  cmd1 = echo hi\n}\n";
    let config = Block::new().parse_str(text).unwrap();
    assert_eq!(
        serde_json::to_value(&config).unwrap(),
        json!({"default": {"verbose": "true"}, "host1.example.org": {"cmd1": "echo hi"}})
    );
}

#[test]
fn test_many_hosts() {
    let mut text = String::from("username = deploy\n\n");
    for i in 1..=10 {
        text.push_str(&format!("lab{i:03}.example.org {{\n"));
        for c in 1..=i % 4 + 1 {
            text.push_str(&format!("    cmd{c} = step {c} on {i}\n"));
        }
        text.push_str("}\n\n");
    }

    let config = Block::new().parse_str(&text).unwrap();
    assert_eq!(config.len(), 11);
    for (name, body) in config.iter().skip(1) {
        let i: usize = name[3..6].parse().unwrap();
        assert_eq!(body.len(), i % 4 + 1, "block {name}");
        assert_eq!(body.get("cmd1"), Some(format!("step 1 on {i}").as_str()));
    }
}

#[test]
fn test_list_and_map_blocks_side_by_side() {
    let text = "\
mirrors {
  ftp.example.org
  www.example.org
}
backup {
  target = /mnt/backup
  keep = 7
}
";
    let config = Block::new().parse_str(text).unwrap();
    assert_eq!(
        config.get("mirrors"),
        Some(&Section::List(vec![
            "ftp.example.org".to_string(),
            "www.example.org".to_string()
        ]))
    );
    assert_eq!(config.value("backup", "keep"), Some("7"));
}

#[test]
fn test_mixed_block_is_coerced() {
    let text = "m {\n  plain\n  k = v\n}\n";
    let config = Block::new().parse_str(text).unwrap();
    assert_eq!(config.list("m").unwrap(), ["plain", "k = v"]);
}

#[test]
fn test_custom_separator() {
    let text = "retries: 3\nweb {\n  url: http://web:8080\n}\n";
    let config = Block::new().with_separator(':').parse_str(text).unwrap();
    assert_eq!(config.value("default", "retries"), Some("3"));
    assert_eq!(config.value("web", "url"), Some("http://web:8080"));
}
