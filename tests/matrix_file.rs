//! Integration tests for the binary matrix file format.

use std::io::Cursor;

use thin_matrix::{DenseMatrix, HeaderWidth, MatrixFileConfig};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample() -> DenseMatrix<f32> {
    DenseMatrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap()
}

// ---------------------------------------------------------------------------
// save / load
// ---------------------------------------------------------------------------

#[test]
fn save_and_load_round_trip() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.tmf");

    let m = sample();
    m.save(&path).unwrap();

    let loaded = DenseMatrix::<f32>::load_from_file(&path).unwrap();
    assert_eq!(loaded.shape(), (2, 3));
    assert_eq!(loaded, m);
}

#[test]
fn saved_file_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.tmf");
    sample().save(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 16 + 6 * 4);
    assert_eq!(&bytes[0..8], &2u64.to_ne_bytes());
    assert_eq!(&bytes[8..16], &3u64.to_ne_bytes());
    assert_eq!(&bytes[16..20], &1.0f32.to_ne_bytes());
    assert_eq!(&bytes[36..40], &6.0f32.to_ne_bytes());
}

#[test]
fn load_replaces_existing_contents() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("replace.tmf");
    sample().save(&path).unwrap();

    let mut m = DenseMatrix::from_elem(5, 5, 0.0f32);
    m.load(&path).unwrap();
    assert_eq!(m.shape(), (2, 3));
    assert_eq!(m, sample());
}

#[test]
fn save_truncates_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truncate.tmf");
    DenseMatrix::from_elem(10, 10, 1.0f64).save(&path).unwrap();

    let small = DenseMatrix::from_vec(1, 2, vec![3.0f64, 4.0]).unwrap();
    small.save(&path).unwrap();
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 16 + 2 * 8);
    assert_eq!(DenseMatrix::<f64>::load_from_file(&path).unwrap(), small);
}

#[test]
fn random_matrix_round_trip() {
    use rand::Rng;

    let mut rng = rand::thread_rng();
    let data: Vec<f32> = (0..10 * 12).map(|_| rng.gen::<f32>()).collect();
    let m = DenseMatrix::from_vec(10, 12, data).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("random.tmf");
    m.transpose().save(&path).unwrap();
    let loaded = DenseMatrix::<f32>::load_from_file(&path).unwrap();
    assert_eq!(loaded.shape(), (12, 10));
    assert_eq!(loaded.transpose(), m);
}

#[test]
fn empty_matrix_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.tmf");
    DenseMatrix::<i32>::default().save(&path).unwrap();
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 16);
    let loaded = DenseMatrix::<i32>::load_from_file(&path).unwrap();
    assert_eq!(loaded.shape(), (0, 0));
}

// ---------------------------------------------------------------------------
// Failure modes
// ---------------------------------------------------------------------------

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.tmf");
    let err = DenseMatrix::<f32>::load_from_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("does-not-exist.tmf"));
}

#[test]
fn save_into_missing_directory_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("out.tmf");
    assert!(sample().save(&path).is_err());
}

#[test]
fn truncated_payload_errors_and_keeps_receiver() {
    let mut bytes: Vec<u8> = Vec::new();
    sample().write(&mut bytes).unwrap();
    bytes.truncate(bytes.len() - 3);

    let err = DenseMatrix::<f32>::read_from(Cursor::new(&bytes)).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);

    let mut m = DenseMatrix::from_elem(1, 1, 9.0f32);
    assert!(m.read(Cursor::new(&bytes)).is_err());
    assert_eq!(m.as_slice(), &[9.0]);
}

#[test]
fn truncated_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.tmf");
    let mut bytes: Vec<u8> = Vec::new();
    sample().write(&mut bytes).unwrap();
    std::fs::write(&path, &bytes[..20]).unwrap();
    assert!(DenseMatrix::<f32>::load_from_file(&path).is_err());
}

// ---------------------------------------------------------------------------
// Streams & config
// ---------------------------------------------------------------------------

#[test]
fn stream_round_trip() {
    let m = DenseMatrix::from_vec(3, 2, vec![1i16, -2, 3, -4, 5, -6]).unwrap();
    let mut bytes: Vec<u8> = Vec::new();
    m.write(&mut bytes).unwrap();
    assert_eq!(bytes.len(), 16 + m.byte_size());

    let mut restored: DenseMatrix<i16> = DenseMatrix::default();
    restored.read(Cursor::new(bytes)).unwrap();
    assert_eq!(restored, m);
}

#[test]
fn u32_header_round_trip() {
    let config = MatrixFileConfig::new(HeaderWidth::U32);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy32.tmf");

    let m = sample();
    m.save_with_config(&path, &config).unwrap();
    assert_eq!(
        std::fs::metadata(&path).unwrap().len() as usize,
        config.header_len() + m.byte_size()
    );

    let loaded = DenseMatrix::<f32>::load_from_file_with_config(&path, &config).unwrap();
    assert_eq!(loaded, m);

    let mut target: DenseMatrix<f32> = DenseMatrix::default();
    target.load_with_config(&path, &config).unwrap();
    assert_eq!(target, m);
}

#[test]
fn header_width_mismatch_is_detected_as_short_read() {
    let mut bytes: Vec<u8> = Vec::new();
    sample()
        .write_with_config(&mut bytes, &MatrixFileConfig::new(HeaderWidth::U32))
        .unwrap();
    // Read with 8-byte fields the shape is nonsense and the payload runs short.
    assert!(DenseMatrix::<f32>::read_from(Cursor::new(bytes)).is_err());
}

#[test]
fn oversized_dimension_with_empty_payload_is_rejected() {
    let header = [u64::MAX.to_ne_bytes(), 0u64.to_ne_bytes()].concat();
    let err = DenseMatrix::<f32>::read_from(Cursor::new(header)).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);

    let mut m = DenseMatrix::from_elem(1, 2, 4.0f32);
    let header = [0u64.to_ne_bytes(), u64::MAX.to_ne_bytes()].concat();
    assert!(m.read(Cursor::new(header)).is_err());
    assert_eq!(m.shape(), (1, 2));
}

#[cfg(target_pointer_width = "64")]
#[test]
fn u32_header_overflow_leaves_empty_file() {
    let config = MatrixFileConfig::new(HeaderWidth::U32);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("too-wide.tmf");

    let wide: DenseMatrix<f32> = DenseMatrix::new(0, 1 << 33);
    assert!(wide.save_with_config(&path, &config).is_err());
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
}
