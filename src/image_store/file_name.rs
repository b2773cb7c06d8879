//! Output file naming

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::image_store::types::Gpios;

/// Highest counter tried before giving up on finding a free name.
const MAX_NAME_COUNTER: u32 = 99;

/// Longest suffix, dot included, that is kept behind the counter.
const MAX_SUFFIX_LEN: usize = 4;

/// Returns `path` if it does not exist yet, otherwise the first free
/// `<base>_<n><suffix>` with `n` in `1..=99`.
///
/// The suffix is everything from the last `.` of the file name if that dot
/// lies within its last four characters (`.png`, `.txt`, `.tif`), otherwise
/// the counter is appended to the full name. When all 99 candidates are
/// taken, the original path is returned and the caller will overwrite it.
pub fn ensure_new_file_name(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        return path.to_path_buf();
    };

    let (base, suffix) = match file_name.rfind('.') {
        Some(i) if file_name.len() - i <= MAX_SUFFIX_LEN => file_name.split_at(i),
        _ => (file_name.as_str(), ""),
    };

    for n in 1..=MAX_NAME_COUNTER {
        let candidate = path.with_file_name(format!("{base}_{n}{suffix}"));
        if !candidate.exists() {
            return candidate;
        }
    }

    warn!(
        path = %path.display(),
        "No free file name found after {} attempts, reusing original name",
        MAX_NAME_COUNTER
    );
    path.to_path_buf()
}

/// Encodes the digital I/O state as `_<outputs>_<inputs>`.
///
/// Each part lists the current value of every line configured in that
/// direction, from line 31 down to line 0.
pub fn gpio_suffix(gpios: &Gpios) -> String {
    let mut out = String::new();
    let mut input = String::new();

    for line in (0..32).rev() {
        let value = if (gpios.values >> line) & 1 == 1 { '1' } else { '0' };
        if (gpios.outputs >> line) & 1 == 1 {
            out.push(value);
        }
        if (gpios.inputs >> line) & 1 == 1 {
            input.push(value);
        }
    }

    format!("_{out}_{input}")
}

/// Appends `suffix` to the last component of `prefix` without inserting a separator.
pub(crate) fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(prefix.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_fresh_path_is_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image_left.png");
        assert_eq!(ensure_new_file_name(&path), path);
    }

    #[test]
    fn test_taken_path_gets_counter_before_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image_left.png");
        File::create(&path).unwrap();

        let first = ensure_new_file_name(&path);
        assert_eq!(first, dir.path().join("image_left_1.png"));

        File::create(&first).unwrap();
        assert_eq!(ensure_new_file_name(&path), dir.path().join("image_left_2.png"));
    }

    #[test]
    fn test_long_extension_is_not_split() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image.tiff");
        File::create(&path).unwrap();
        assert_eq!(ensure_new_file_name(&path), dir.path().join("image.tiff_1"));
    }

    #[test]
    fn test_name_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image_1612345678.000000001_left");
        File::create(&path).unwrap();
        assert_eq!(
            ensure_new_file_name(&path),
            dir.path().join("image_1612345678.000000001_left_1")
        );
    }

    #[test]
    fn test_exhausted_names_fall_back_to_original() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        File::create(&path).unwrap();
        for n in 1..=99 {
            File::create(dir.path().join(format!("a_{n}.txt"))).unwrap();
        }
        assert_eq!(ensure_new_file_name(&path), path);
    }

    #[test]
    fn test_gpio_suffix_without_lines() {
        assert_eq!(gpio_suffix(&Gpios::default()), "__");
    }

    #[test]
    fn test_gpio_suffix_one_output_one_input() {
        let gpios = Gpios {
            outputs: 0b01,
            inputs: 0b10,
            values: 0b01,
        };
        assert_eq!(gpio_suffix(&gpios), "_1_0");
    }

    #[test]
    fn test_gpio_suffix_orders_from_highest_line() {
        let gpios = Gpios {
            outputs: (1 << 31) | (1 << 4) | 1,
            inputs: 0,
            values: 1 << 31,
        };
        assert_eq!(gpio_suffix(&gpios), "_100_");
    }

    #[test]
    fn test_with_suffix_keeps_directory() {
        let prefix = Path::new("/tmp/out/image_1.000000000_");
        assert_eq!(
            with_suffix(prefix, "left"),
            PathBuf::from("/tmp/out/image_1.000000000_left")
        );
    }
}
