// Weight-file round trips and dataset parsing.

use approx::assert_abs_diff_eq;
use gradfit::network::{read_weights, write_weights};
use gradfit::{read_dataset, FitError, Network};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn assert_same_weights(a: &Network, b: &Network) {
    assert_eq!(a.layer_sizes(), b.layer_sizes());
    for (wa, wb) in a.weights().iter().zip(b.weights()) {
        for (x, y) in wa.data.iter().flatten().zip(wb.data.iter().flatten()) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-6);
        }
    }
}

#[test]
fn in_memory_round_trip() {
    let net = Network::new(&[4, 5, 2], &mut StdRng::seed_from_u64(3)).unwrap();
    let mut buffer = Vec::new();
    write_weights(net.weights(), &mut buffer).unwrap();
    let restored = Network::from_weights(read_weights(buffer.as_slice()).unwrap()).unwrap();
    assert_same_weights(&net, &restored);
}

#[test]
fn file_round_trip() {
    let net = Network::new(&[2, 3, 3, 1], &mut StdRng::seed_from_u64(11)).unwrap();
    let path = std::env::temp_dir().join(format!("gradfit-weights-{}.tsv", std::process::id()));
    net.save(&path).unwrap();
    let restored = Network::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_same_weights(&net, &restored);
}

#[test]
fn written_format_is_header_then_rows() {
    let net = Network::from_weights(vec![gradfit::Matrix::from_data(vec![vec![0.5, 0.25]]).unwrap()]).unwrap();
    let mut buffer = Vec::new();
    write_weights(net.weights(), &mut buffer).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), "1\t2\n0.5\t0.25\n");
}

#[test]
fn loaded_stack_must_connect() {
    let path = std::env::temp_dir().join(format!("gradfit-bad-{}.tsv", std::process::id()));
    std::fs::write(&path, "1\t2\n0.1\t0.2\n3\t1\n0.1\n0.2\n0.3\n").unwrap();
    let result = Network::load(&path);
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(result, Err(FitError::DimensionMismatch { .. })));
}

#[test]
fn missing_file_is_io_error() {
    assert!(matches!(
        Network::load("/nonexistent/gradfit/weights.tsv"),
        Err(FitError::Io(_))
    ));
}

#[test]
fn dataset_from_tab_separated_text() {
    let text = "0\t0\t0\n0\t1\t1\n1\t0\t1\n1\t1\t0\n";
    let ds = read_dataset(text.as_bytes()).unwrap();
    assert_eq!(ds.len(), 4);
    assert_eq!(ds.arity(), 2);
    assert_eq!(ds.label_rows(), vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]]);
}

#[test]
fn empty_dataset_is_rejected() {
    assert!(matches!(read_dataset("\n\n".as_bytes()), Err(FitError::InvalidArgument(_))));
}
