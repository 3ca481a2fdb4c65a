use super::*;
use crate::complex::SimplicialComplex;
use crate::encode::{train_test_masks, TrainingEncoder};
use crate::geom2::Triangle;
use crate::walks::Walk;
use nalgebra::Vector2;
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use tempfile::tempdir;

/// Square 0-1-2-3 split along 1-3: faces (0,1,3) and (1,2,3).
fn square() -> SimplicialComplex {
    let points = vec![
        Vector2::new(0.1, 0.1),
        Vector2::new(0.9, 0.1),
        Vector2::new(0.9, 0.9),
        Vector2::new(0.1, 0.9),
    ];
    let faces = vec![Triangle::new(0, 1, 3), Triangle::new(1, 2, 3)];
    SimplicialComplex::from_parts(points, faces, &[]).unwrap()
}

fn sample_dataset() -> Dataset {
    let sc = square();
    let (b1, b2) = sc.incidence_matrices();
    let walks: Vec<Walk> = [vec![0, 1, 2, 3], vec![3, 1, 0, 3], vec![2, 3, 0, 1, 2]]
        .into_iter()
        .map(|nodes| Walk { nodes, corridor: 0 })
        .collect();
    let mut rng = StdRng::seed_from_u64(5);
    let hops = [1];
    let enc = TrainingEncoder::for_complex(&sc, &b1, &hops)
        .unwrap()
        .encode(&walks, &mut rng)
        .unwrap();
    let (train_mask, test_mask) = train_test_masks(walks.len(), 0.8, &mut rng);
    Dataset {
        flows_in: enc.flows_in,
        b1,
        b2,
        bconds: enc.bconds,
        targets: enc.targets,
        train_mask,
        test_mask,
        graph: sc.graph.clone(),
        last_nodes: enc.last_nodes,
    }
}

#[test]
fn adjlist_lists_higher_neighbors_only() {
    let text = format_adjlist(&square().graph);
    let body: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
    assert_eq!(body, vec!["0 1 3", "1 2 3", "2 3", "3"]);
    assert_eq!(parse_adjlist(&text).unwrap(), square().graph);
}

#[test]
fn adjlist_parse_accepts_comments_and_either_direction() {
    let text = "# header\n0 1\n1\n2 1 0 # trailing\n\n";
    let g = parse_adjlist(text).unwrap();
    assert_eq!(g.node_count(), 3);
    assert_eq!(g.neighbors(0), &[1, 2]);
    assert_eq!(g.neighbors(1), &[0, 2]);
    assert_eq!(g.edge_count(), 3);
}

#[test]
fn adjlist_parse_rejects_bad_input() {
    for text in ["0 1\n2\n", "0 0\n", "0 x\n1\n", "0 5\n1\n", "0\n0\n"] {
        assert!(
            matches!(parse_adjlist(text), Err(DatasetError::Format { .. })),
            "{text:?}"
        );
    }
}

#[test]
fn save_then_load_reproduces_everything() {
    let ds = sample_dataset();
    assert_eq!(ds.check_shapes().ok(), Some(()));
    let tmp = tempdir().unwrap();
    let dir = tmp.path().join("run");
    save(&ds, &dir).unwrap();
    for file in DATASET_FILES {
        assert!(dir.join(file).is_file(), "{file}");
    }
    let back = load(&dir).unwrap();
    assert_eq!(back, ds);
}

#[test]
fn save_replaces_existing_directory_and_cleans_up() {
    let ds = sample_dataset();
    let tmp = tempdir().unwrap();
    let dir = tmp.path().join("run");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("stale.txt"), "old").unwrap();
    save(&ds, &dir).unwrap();
    assert!(!dir.join("stale.txt").exists());
    let leftovers: Vec<_> = fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("run")]);
}

#[test]
fn failed_save_creates_nothing() {
    let ds = sample_dataset();
    let tmp = tempdir().unwrap();
    let blocker = tmp.path().join("not_a_dir");
    fs::write(&blocker, "keep").unwrap();
    let dir = blocker.join("run");
    assert!(matches!(save(&ds, &dir), Err(DatasetError::Io { .. })));
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "keep");
    let entries: Vec<_> = fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("not_a_dir")]);
}

#[test]
fn failed_save_keeps_previous_dataset() {
    let old = sample_dataset();
    let tmp = tempdir().unwrap();
    let dir = tmp.path().join("run");
    save(&old, &dir).unwrap();
    // The new target sits under a file of the existing dataset.
    let blocked = dir.join(B1_FILE).join("nested");
    assert!(matches!(save(&old, &blocked), Err(DatasetError::Io { .. })));
    let leftovers: Vec<_> = fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("run")]);
    assert_eq!(load(&dir).unwrap(), old);
}

#[test]
fn load_reports_missing_and_inconsistent_files() {
    let ds = sample_dataset();
    let tmp = tempdir().unwrap();
    let dir = tmp.path().join("run");
    save(&ds, &dir).unwrap();

    fs::remove_file(dir.join(B2_FILE)).unwrap();
    assert!(matches!(load(&dir), Err(DatasetError::Io { .. })));

    let mut bad = ds.clone();
    bad.last_nodes = Array1::from(vec![0i64, 1]);
    save(&bad, &dir).unwrap();
    match load(&dir) {
        Err(DatasetError::Format { file, .. }) => assert_eq!(file, LAST_NODES_FILE),
        other => panic!("expected a format error, got {other:?}"),
    }

    fs::write(dir.join(TARGETS_FILE), b"not npy").unwrap();
    assert!(matches!(load(&dir), Err(DatasetError::Npy { .. })));
}

#[test]
fn per_example_queries() {
    let ds = sample_dataset();
    assert_eq!(ds.hop_count(), 1);
    assert_eq!(ds.example_count(), 3);
    assert_eq!((ds.node_count(), ds.edge_count(), ds.face_count()), (4, 5, 2));
    assert_eq!(ds.max_degree(), 3);
    for i in 0..3 {
        let pivot = ds.last_nodes[i] as usize;
        assert_eq!(ds.choice_count(0, i), ds.graph.degree(pivot));
        let pos = ds.target_position(0, i).unwrap();
        assert!(pos < ds.graph.degree(pivot));
    }
}
