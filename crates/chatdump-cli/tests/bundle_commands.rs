//! bundle / manifest commands.

use chatdump_testing::TestWorld;
use chatdump_testing::fixtures::{ConversationBuilder, tool_result};
use predicates::prelude::*;
use serde_json::json;

#[test]
fn test_bundle_writes_document_and_files() {
    let world = TestWorld::new().with_sample("conversation.json");

    let result = world
        .run(&["bundle", "conversation.json", "-o", "export"])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().trim_end().ends_with("debug-the-deploy-script.md"));

    let doc = world.read_file("export/debug-the-deploy-script.md").unwrap();
    assert!(doc.ends_with("## Files\n\n- `files/deploy.sh`\n- `files/image-1.png`\n"));

    let script = world.read_file("export/files/deploy.sh").unwrap();
    assert_eq!(script, "#!/bin/sh\nset -e\nbuild\npush --tag latest\n");

    let png = std::fs::read(world.path("export/files/image-1.png")).unwrap();
    assert!(png.starts_with(b"\x89PNG"));
}

#[test]
fn test_bundle_skips_undecodable_payload() {
    let conversation = ConversationBuilder::new()
        .name("Broken image")
        .assistant(vec![tool_result(
            "t1",
            json!([{"type": "image", "source": {"type": "base64", "media_type": "image/png", "data": "!!!"}}]),
        )])
        .build();
    let world = TestWorld::new().with_conversation("conv.json", &conversation);

    let result = world.run(&["bundle", "conv.json", "-o", "out"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(predicate::str::contains("skipping files/image-1.png").eval(result.stderr()));
    assert!(world.path("out/broken-image.md").exists());
    assert!(!world.path("out/files/image-1.png").exists());
}

#[test]
fn test_manifest_json() {
    let world = TestWorld::new().with_sample("conversation.json");

    let result = world.run(&["manifest", "conversation.json"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let manifest = result.json().unwrap();
    let entries = manifest.as_array().unwrap();
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0]["path"], "files/deploy.sh");
    assert_eq!(entries[0]["encoding"], "text");
    assert_eq!(entries[0]["size"], 41);

    assert_eq!(entries[1]["path"], "files/image-1.png");
    assert_eq!(entries[1]["encoding"], "base64");
    assert_eq!(entries[1]["media_type"], "image/png");
    assert!(entries[1]["size"].as_u64().unwrap() > 0);
}

#[test]
fn test_manifest_of_conversation_without_files() {
    let conversation = ConversationBuilder::new().human("no files here").build();
    let world = TestWorld::new().with_conversation("conv.json", &conversation);

    let result = world.run(&["manifest", "conv.json"]).unwrap();
    assert!(result.success());
    assert_eq!(result.json().unwrap(), json!([]));
}
