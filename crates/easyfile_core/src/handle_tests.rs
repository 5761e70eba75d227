/* 📖 # Handle lifecycle and cross-operation tests

These scenarios run against both MockPal and a RealPal rooted in a temp directory,
so the guarantees hold for the real filesystem and not only for the test double.
*/

#[cfg(test)]
mod tests {
    use easyfile_base::{ErrorKind, FilePath, MockPal, PalHandle, RealPal};
    use expect_test::expect;
    use tempfile::TempDir;

    use crate::{ContentKind, EasyFs};

    const TEXT_MODES: [&str; 6] = ["r", "w", "a", "r+", "w+", "a+"];
    const BINARY_MODES: [&str; 6] = ["rb", "wb", "ab", "r+b", "w+b", "a+b"];
    const CREATE_TEXT_MODES: [&str; 4] = ["w", "w+", "a", "a+"];
    const CREATE_BINARY_MODES: [&str; 4] = ["wb", "w+b", "ab", "a+b"];

    fn with_each_fs(test: impl Fn(EasyFs)) {
        test(EasyFs::new(PalHandle::new(MockPal::new())));
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        test(EasyFs::new(PalHandle::new(RealPal::new(
            temp_dir.path().to_path_buf(),
        ))));
    }

    fn seed(fs: &EasyFs, path: &str, content: &[u8]) {
        let mut handle = fs.open_binary(path, "wb").unwrap();
        assert_eq!(handle.write_records(content, 1, content.len()).unwrap(), content.len());
    }

    #[test]
    fn test_every_mode_in_any_case_opens_existing_file() {
        with_each_fs(|fs| {
            for raw in TEXT_MODES {
                seed(&fs, "existing.txt", b"x");
                for variant in [raw.to_string(), raw.to_uppercase()] {
                    let handle = fs.open_text("existing.txt", &variant).unwrap();
                    assert_eq!(handle.mode().unwrap().as_str(), raw);
                    assert_eq!(handle.kind(), Some(ContentKind::Text));
                }
            }
            for raw in BINARY_MODES {
                seed(&fs, "existing.bin", b"x");
                for variant in [raw.to_string(), raw.to_uppercase(), raw.replace('b', "B")] {
                    let handle = fs.open_binary("existing.bin", &variant).unwrap();
                    assert_eq!(handle.mode().unwrap().as_str(), raw);
                    assert_eq!(handle.kind(), Some(ContentKind::Binary));
                }
            }
        });
    }

    #[test]
    fn test_invalid_mode_creates_nothing() {
        with_each_fs(|fs| {
            for raw in ["rw", "rb", "x", ""] {
                let err = fs.open_text("never.txt", raw).unwrap_err();
                assert!(matches!(err.kind(), ErrorKind::InvalidMode { .. }));
            }
            let err = fs.open_binary("never.bin", "w").unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::InvalidMode { .. }));
            assert!(!fs.exists("never.txt"));
            assert!(!fs.exists("never.bin"));
        });
    }

    #[test]
    fn test_read_modes_on_missing_file_are_target_missing() {
        with_each_fs(|fs| {
            for raw in ["r", "r+"] {
                let err = fs.open_text("missing.txt", raw).unwrap_err();
                assert!(matches!(err.kind(), ErrorKind::TargetMissing { .. }));
            }
            for raw in ["rb", "r+b"] {
                let err = fs.open_binary("missing.bin", raw).unwrap_err();
                assert!(matches!(err.kind(), ErrorKind::TargetMissing { .. }));
            }
            assert!(!fs.exists("missing.txt"));
        });
    }

    #[test]
    fn test_create_modes_on_missing_file_create_it() {
        with_each_fs(|fs| {
            for raw in CREATE_TEXT_MODES {
                let path = format!("created-{}.txt", raw.replace('+', "plus"));
                let handle = fs.open_text(path.as_str(), raw).unwrap();
                assert!(handle.is_open());
                assert!(fs.exists(path.as_str()));
            }
            for raw in CREATE_BINARY_MODES {
                let path = format!("created-{}.bin", raw.replace('+', "plus"));
                drop(fs.open_binary(path.as_str(), raw).unwrap());
                assert!(fs.exists(path.as_str()));
            }
        });
    }

    #[test]
    fn test_text_round_trip() {
        with_each_fs(|fs| {
            let content = b"first line\nsecond line\n\ttabbed\r\nlast";
            let mut writer = fs.open_text("round.txt", "w").unwrap();
            assert_eq!(writer.write(content).unwrap(), content.len());
            writer.close();

            let mut reader = fs.open_text("round.txt", "r").unwrap();
            let mut buffer = Vec::new();
            assert_eq!(reader.read_all(&mut buffer).unwrap(), content.len());
            assert_eq!(buffer, content);
            assert_eq!(fs.size_of("round.txt").unwrap(), content.len() as u64);
        });
    }

    #[test]
    fn test_read_line_scenario() {
        with_each_fs(|fs| {
            seed(&fs, "lines.txt", b"abc\ndef");
            let mut handle = fs.open_text("lines.txt", "r").unwrap();
            let mut buffer = Vec::new();

            assert_eq!(handle.read_line(&mut buffer).unwrap(), 3);
            assert_eq!(buffer, b"abc\n");
            assert_eq!(handle.read_line(&mut buffer).unwrap(), 3);
            assert_eq!(buffer, b"abc\ndef");
        });
    }

    #[test]
    fn test_binary_round_trip_keeps_order() {
        with_each_fs(|fs| {
            let records: Vec<u8> = (0..64u16).flat_map(|n| (n * 1000).to_be_bytes()).collect();
            let mut writer = fs.open_binary("records.bin", "wb").unwrap();
            assert_eq!(writer.write_records(&records, 2, 64).unwrap(), 64);
            writer.close();

            let mut reader = fs.open_binary("records.bin", "rb").unwrap();
            let mut buffer = vec![0u8; records.len()];
            assert_eq!(reader.read_records(&mut buffer, 2, 64).unwrap(), 64);
            assert_eq!(buffer, records);
        });
    }

    #[test]
    fn test_wipe_then_size_is_zero() {
        with_each_fs(|fs| {
            seed(&fs, "log.txt", b"old entries");
            fs.wipe("log.txt").unwrap();
            assert_eq!(fs.size_of("log.txt").unwrap(), 0);

            let err = fs.size_of("absent.txt").unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::TargetMissing { .. }));
        });
    }

    #[test]
    fn test_close_twice_is_noop() {
        with_each_fs(|fs| {
            let mut handle = fs.open_text("close.txt", "w").unwrap();
            assert!(handle.is_valid());

            handle.close();
            handle.close();

            assert!(!handle.is_valid());
            assert!(!handle.is_open());
            assert_eq!(handle.kind(), None);
            assert_eq!(handle.mode(), None);
            assert_eq!(handle.path(), None);
        });
    }

    #[test]
    fn test_operations_on_closed_handle_are_not_open() {
        with_each_fs(|fs| {
            let mut text = fs.open_text("closed.txt", "w+").unwrap();
            text.close();
            let mut buffer = Vec::new();
            for err in [
                text.write(b"x").unwrap_err(),
                text.read_line(&mut buffer).unwrap_err(),
                text.read_all(&mut buffer).unwrap_err(),
                text.read_bounded(&mut buffer, 4).unwrap_err(),
            ] {
                assert!(matches!(err.kind(), ErrorKind::NotOpen));
            }

            let mut binary = fs.open_binary("closed.bin", "w+b").unwrap();
            binary.close();
            let mut records = [0u8; 4];
            let err = binary.read_records(&mut records, 4, 1).unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::NotOpen));
            let err = binary.write_records(&records, 4, 1).unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::NotOpen));
        });
    }

    #[test]
    fn test_wrong_kind_does_not_touch_file() {
        with_each_fs(|fs| {
            seed(&fs, "mixed.dat", b"0123456789");

            let mut binary = fs.open_binary("mixed.dat", "r+b").unwrap();
            let mut buffer = Vec::new();
            let err = binary.read_line(&mut buffer).unwrap_err();
            expect!["Cannot read a line on a binary file handle (requires text)"]
                .assert_eq(&err.to_string());
            assert!(matches!(binary.write(b"zz").unwrap_err().kind(), ErrorKind::WrongKind { .. }));
            assert!(matches!(
                binary.read_all(&mut buffer).unwrap_err().kind(),
                ErrorKind::WrongKind { .. }
            ));
            assert!(buffer.is_empty());
            let mut records = [0u8; 10];
            assert_eq!(binary.read_records(&mut records, 1, 10).unwrap(), 10);
            assert_eq!(&records, b"0123456789");
            binary.close();

            let mut text = fs.open_text("mixed.dat", "r+").unwrap();
            let err = text.write_records(b"zz", 1, 2).unwrap_err();
            expect!["Cannot write records on a text file handle (requires binary)"]
                .assert_eq(&err.to_string());
            let err = text.read_records(&mut records, 1, 10).unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::WrongKind { .. }));
            let err = text.read_all_bytes(&mut buffer).unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::WrongKind { .. }));
            assert_eq!(text.read_bounded(&mut buffer, 3).unwrap(), 3);
            assert_eq!(buffer, b"012");
        });
    }

    #[test]
    fn test_drop_releases_and_keeps_written_data() {
        with_each_fs(|fs| {
            {
                let mut handle = fs.open_text("scoped.txt", "a").unwrap();
                handle.write(b"kept").unwrap();
            }
            assert_eq!(fs.size_of("scoped.txt").unwrap(), 4);
        });
    }

    #[test]
    fn test_handle_records_path_as_given() {
        with_each_fs(|fs| {
            let handle = fs.open_text("./given.txt", "W").unwrap();
            assert_eq!(handle.path(), Some(&FilePath::from("./given.txt")));
            assert_eq!(handle.mode().unwrap().to_string(), "w");
        });
    }

    #[test]
    fn test_empty_path_is_invalid_argument() {
        let fs = EasyFs::new(PalHandle::new(MockPal::new()));
        let err = fs.open_text("", "w").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
        let err = fs.wipe("").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
    }

    #[test]
    fn test_open_failed_when_platform_refuses() {
        let mock = MockPal::new();
        mock.deny_open(FilePath::from("locked.txt"));
        let fs = EasyFs::new(PalHandle::new(mock));

        let err = fs.open_text("locked.txt", "w").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::OpenFailed { .. }));
    }
}
