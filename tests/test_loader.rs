#[cfg(test)]
mod test_loader {
    use bayesnet::loader::load_files;
    use bayesnet::{ask, Error};
    use std::collections::HashMap;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_files(structure: &str, cpts: &str) -> (TempDir, PathBuf, PathBuf) {
        let dir = TempDir::new().unwrap();
        let structure_path = dir.path().join("structure.txt");
        let cpt_path = dir.path().join("cpts.txt");
        fs::write(&structure_path, structure).unwrap();
        fs::write(&cpt_path, cpts).unwrap();
        (dir, structure_path, cpt_path)
    }

    const RAIN_STRUCTURE: &str = "\
# two-node chain
Rain -> Umbrella
";

    const RAIN_CPTS: &str = "\
NODE Rain
VALUES yes no
TABLE
0.2 0.8
ENDNODE

NODE Umbrella
VALUES yes no
PARENTS Rain
TABLE
yes 0.9 0.1
no 0.2 0.8
ENDNODE
";

    #[test]
    fn test_load_and_query_round_trip() {
        let (_dir, structure, cpts) = write_files(RAIN_STRUCTURE, RAIN_CPTS);
        let network = load_files(&structure, &cpts).unwrap();
        assert_eq!(network.len(), 2);

        let evidence = HashMap::from([("Umbrella".to_string(), "yes".to_string())]);
        let posterior = ask(&network, "Rain", &evidence).unwrap();
        assert!((posterior.probability("yes").unwrap() - 0.18 / 0.34).abs() < 1e-9);
    }

    #[test]
    fn test_structure_line_without_arrow_fails_with_line_number() {
        let (_dir, structure, cpts) = write_files("# comment\nRain Umbrella\n", RAIN_CPTS);
        let err = load_files(&structure, &cpts).unwrap_err();
        let format = err.downcast_ref::<Error>().unwrap();
        assert!(matches!(format, Error::Format { line: 2, .. }));
    }

    #[test]
    fn test_cpt_row_with_wrong_width_fails() {
        let bad_cpts = "\
NODE Rain
VALUES yes no
TABLE
0.2 0.3 0.5
ENDNODE
";
        let (_dir, structure, cpts) = write_files("", bad_cpts);
        let err = load_files(&structure, &cpts).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>().unwrap(),
            Error::Format { line: 4, .. }
        ));
    }

    #[test]
    fn test_cpt_row_with_bad_sum_fails() {
        let bad_cpts = "\
NODE Rain
VALUES yes no
TABLE
0.2 0.7
ENDNODE
";
        let (_dir, structure, cpts) = write_files("", bad_cpts);
        let err = load_files(&structure, &cpts).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>().unwrap(),
            Error::BadRowSum { .. }
        ));
    }

    #[test]
    fn test_cpt_file_alone_defines_the_network() {
        // PARENTS lines register the edges, so an empty structure file
        // still yields the full chain.
        let (_dir, structure, cpts) = write_files("", RAIN_CPTS);
        let network = load_files(&structure, &cpts).unwrap();
        assert_eq!(network.len(), 2);
        assert_eq!(network.node("Umbrella").unwrap().parents, vec!["Rain"]);
        assert_eq!(network.children_of("Rain"), ["Umbrella"]);
    }

    #[test]
    fn test_duplicate_edges_are_recorded_once() {
        let structure = "Rain -> Umbrella\nRain -> Umbrella\n";
        let (_dir, structure, cpts) = write_files(structure, RAIN_CPTS);
        let network = load_files(&structure, &cpts).unwrap();
        assert_eq!(network.node("Umbrella").unwrap().parents, vec!["Rain"]);
        assert_eq!(network.children_of("Rain"), ["Umbrella"]);
    }

    #[test]
    fn test_missing_cpt_coverage_fails_validation() {
        let incomplete = "\
NODE Rain
VALUES yes no
TABLE
0.2 0.8
ENDNODE

NODE Umbrella
VALUES yes no
PARENTS Rain
TABLE
yes 0.9 0.1
ENDNODE
";
        let (_dir, structure, cpts) = write_files(RAIN_STRUCTURE, incomplete);
        let err = load_files(&structure, &cpts).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>().unwrap(),
            Error::MissingCptRow { node, .. } if node == "Umbrella"
        ));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let (_dir, structure, cpts) = write_files(RAIN_STRUCTURE, RAIN_CPTS);
        fs::remove_file(&structure).unwrap();
        let err = load_files(&structure, &cpts).unwrap_err();
        assert!(err.to_string().contains("structure file"));
    }
}
