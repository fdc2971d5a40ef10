//! Cross-process determinism: spawns `plan_fixture` under environment
//! variants and asserts every run prints identical output.

use std::path::Path;
use std::process::Command;

fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("plan_fixture");
    path.to_string_lossy().to_string()
}

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn run_variant(work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();

    let mut command = Command::new(&bin);
    command.current_dir(work_dir);

    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("RUST_LOG");

    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });

    assert!(
        output.status.success(),
        "plan_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_four_env_variants() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[]);

    for world in [
        "stationary",
        "shuttle",
        "dock_transfer",
        "stack_reversal",
    ] {
        assert!(
            baseline.contains(&format!("world={world}\n")),
            "baseline output missing world {world}"
        );
    }
    assert_eq!(baseline.matches("report_digest=sha256:").count(), 4);
    assert_eq!(baseline.matches("plan_output_digest=sha256:").count(), 4);

    let tmp = std::env::temp_dir().to_string_lossy().to_string();
    let variants: [(&str, &[(&str, &str)]); 3] = [
        ("cwd=tmp", &[]),
        ("LC_ALL=C", &[("LC_ALL", "C")]),
        ("LANG=tr_TR.UTF-8", &[("LANG", "tr_TR.UTF-8")]),
    ];
    for (label, overrides) in variants {
        let dir = if label == "cwd=tmp" { &tmp } else { &root };
        let out = run_variant(dir, overrides);
        assert_eq!(baseline, out, "variant {label} diverged from baseline");
    }
}

#[test]
fn fixture_reports_known_shapes() {
    let out = run_variant(&workspace_root(), &[]);
    let blocks: Vec<&str> = out.split("world=").filter(|b| !b.is_empty()).collect();
    assert_eq!(blocks.len(), 4);

    let stationary = blocks[0];
    assert!(stationary.starts_with("stationary\n"));
    assert!(stationary.contains("steps=2\n"));
    assert!(stationary.contains("rounds=1\n"));

    let shuttle = blocks[1];
    assert!(shuttle.starts_with("shuttle\n"));
    assert!(shuttle.contains("steps=3\n"));
    assert!(shuttle.contains("rounds=2\n"));

    let dock = blocks[2];
    assert!(dock.starts_with("dock_transfer\n"));
    assert!(dock.contains("steps=4\n"));
    assert!(dock.contains("rounds=3\n"));

    let reversal = blocks[3];
    assert!(reversal.starts_with("stack_reversal\n"));
    assert!(reversal.contains("steps=6\n"));
    assert!(reversal.contains("rounds=5\n"));
}
