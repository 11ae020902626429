use super::*;
use dev_utils::archive::{entry_names, write_archive, Entry};
use dev_utils::fs::TempDir;
use dev_utils::project::{relative_files, ProjectBuilder};

// **************
// *** export ***
// **************

#[test]
fn export_should_only_include_version_directories() {
    let prj = ProjectBuilder::new("proj")
        .version("1.0.0")
        .other_dir("not-a-version")
        .build()
        .unwrap();

    let out = TempDir::new().unwrap();
    let archive = out.path().join("out.zip");
    let summary = export(&prj.path, &archive, &ExportOptions::new()).expect("export should work");

    assert_eq!(archive, summary.archive);
    assert_eq!(prj.metadata_file, summary.metadata_file);
    assert!(!summary.statistics);
    assert_eq!(vec!["1.0.0".parse::<UpdateVersion>().unwrap()], summary.versions);

    let names = entry_names(&archive).unwrap();
    assert_eq!(
        vec![
            "1.0.0/",
            "1.0.0/files/",
            "1.0.0/files/nested/",
            "1.0.0/files/nested/readme.txt",
            "1.0.0/payload.bin",
            "proj.updproj",
        ],
        names
    );
}

#[test]
fn export_should_include_statistics_file_if_present() {
    let prj = ProjectBuilder::new("stats")
        .statistics("<?php ?>")
        .build()
        .unwrap();

    let out = TempDir::new().unwrap();
    let archive = out.path().join("stats.zip");
    let summary = export(&prj.path, &archive, &ExportOptions::new()).unwrap();

    assert!(summary.statistics);
    assert_eq!(
        vec![STATISTICS_FILE, "stats.updproj"],
        entry_names(&archive).unwrap()
    );
}

#[test]
fn export_without_versions_should_only_contain_metadata() {
    let prj = ProjectBuilder::new("empty").build().unwrap();
    let out = TempDir::new().unwrap();
    let archive = out.path().join("empty.zip");

    let summary = export(&prj.path, &archive, &ExportOptions::new()).unwrap();
    assert!(summary.versions.is_empty());
    assert_eq!(vec!["empty.updproj"], entry_names(&archive).unwrap());
}

#[test]
fn export_should_only_include_selected_versions() {
    let prj = ProjectBuilder::new("selected")
        .version("1.0.0")
        .version("1.1.0")
        .version("2.0.0")
        .build()
        .unwrap();

    let out = TempDir::new().unwrap();
    let archive = out.path().join("selected.zip");
    let options = ExportOptions::new().versions(vec![
        "2.0.0".parse().unwrap(),
        "1.0.0".parse().unwrap(),
    ]);

    let summary = export(&prj.path, &archive, &options).unwrap();
    let versions = summary
        .versions
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>();

    assert_eq!(vec!["1.0.0", "2.0.0"], versions);
    let names = entry_names(&archive).unwrap();
    assert!(!names.iter().any(|name| name.starts_with("1.1.0")));
}

#[test]
fn export_should_error_if_selected_version_does_not_exist() {
    let prj = ProjectBuilder::new("missing").version("1.0.0").build().unwrap();
    let out = TempDir::new().unwrap();
    let archive = out.path().join("missing.zip");
    let options = ExportOptions::new().versions(vec!["3.0.0".parse().unwrap()]);

    match export(&prj.path, &archive, &options) {
        Err(Error::NotFound(path)) => assert_eq!(prj.path.join("3.0.0"), path),
        res => panic!("expected not found error, found {res:?}"),
    }
    assert!(!archive.exists(), "archive should not be created");
}

#[test]
fn export_should_error_if_project_does_not_exist() {
    let dir = TempDir::new().unwrap();
    let res = export(
        dir.path().join("missing"),
        dir.path().join("out.zip"),
        &ExportOptions::new(),
    );

    assert!(matches!(res, Err(Error::NotFound(_))));
}

#[test]
fn export_should_error_if_metadata_is_missing() {
    let prj = ProjectBuilder::new("bare")
        .without_metadata()
        .version("1.0.0")
        .build()
        .unwrap();

    let out = TempDir::new().unwrap();
    let archive = out.path().join("bare.zip");
    let err = export(&prj.path, &archive, &ExportOptions::new()).unwrap_err();
    assert!(err.is_missing_metadata(), "unexpected error {err:?}");
    assert!(!archive.exists(), "archive should not be created");
    assert!(
        fs::read_dir(out.path()).unwrap().next().is_none(),
        "no temporary files should remain"
    );
}

#[test]
fn export_should_use_given_metadata_file() {
    let prj = ProjectBuilder::new("external")
        .without_metadata()
        .version("1.0")
        .build()
        .unwrap();

    let mut elsewhere = TempDir::new().unwrap();
    let metadata_file = elsewhere.mkfile_with_name("external.updproj").unwrap();
    fs::write(&metadata_file, "{}").unwrap();

    let archive = elsewhere.path().join("external.zip");
    let options = ExportOptions::new().metadata_file(&metadata_file);
    export(&prj.path, &archive, &options).expect("export should work");

    let names = entry_names(&archive).unwrap();
    assert!(names.contains(&"external.updproj".to_string()));
    assert!(names.contains(&"1.0/payload.bin".to_string()));
}

#[test]
fn export_should_replace_existing_archive() {
    let prj = ProjectBuilder::new("replace").version("1.0.0").build().unwrap();
    let out = TempDir::new().unwrap();
    let archive = out.path().join("replace.zip");
    fs::write(&archive, "stale contents").unwrap();

    export(&prj.path, &archive, &ExportOptions::new()).expect("export should work");
    let names = entry_names(&archive).expect("archive should be valid");
    assert!(names.contains(&"replace.updproj".to_string()));
}

#[test]
fn export_should_not_modify_project() {
    let prj = ProjectBuilder::new("readonly")
        .statistics("stats")
        .version("1.0.0")
        .other_dir("drafts")
        .build()
        .unwrap();

    let before = relative_files(&prj.path).unwrap();
    let out = TempDir::new().unwrap();
    export(&prj.path, out.path().join("a.zip"), &ExportOptions::new()).unwrap();
    assert_eq!(before, relative_files(&prj.path).unwrap());
}

#[test]
fn export_should_error_if_destination_directory_does_not_exist() {
    let prj = ProjectBuilder::new("nowhere").build().unwrap();
    let out = TempDir::new().unwrap();
    let res = export(
        &prj.path,
        out.path().join("missing").join("a.zip"),
        &ExportOptions::new(),
    );

    assert!(matches!(res, Err(Error::Io(_))));
}

#[cfg(unix)]
#[test]
fn export_should_error_on_file_names_that_can_not_be_archived() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let prj = ProjectBuilder::new("unnamed").version("1.0.0").build().unwrap();
    let bad_name = OsStr::from_bytes(b"bad\xffname.bin");
    fs::write(prj.path.join("1.0.0").join(bad_name), "payload").unwrap();

    let out = TempDir::new().unwrap();
    let archive = out.path().join("unnamed.zip");
    let res = export(&prj.path, &archive, &ExportOptions::new());
    assert!(matches!(res, Err(Error::Archive(ArchiveError::Write(_)))));
    assert!(!archive.exists(), "archive should not be created");
}

#[test]
fn export_should_error_if_destination_is_inside_exported_version() {
    let prj = ProjectBuilder::new("nested").version("1.0.0").build().unwrap();
    let before = relative_files(&prj.path).unwrap();
    let archive = prj.path.join("1.0.0").join("out.zip");

    match export(&prj.path, &archive, &ExportOptions::new()) {
        Err(Error::Io(err)) => assert_eq!(io::ErrorKind::InvalidInput, err.kind()),
        res => panic!("expected invalid input error, found {res:?}"),
    }

    assert_eq!(before, relative_files(&prj.path).unwrap(), "project should be unchanged");
}

#[test]
fn export_should_allow_destination_inside_unselected_version() {
    let prj = ProjectBuilder::new("other")
        .version("1.0.0")
        .version("2.0.0")
        .build()
        .unwrap();

    let archive = prj.path.join("1.0.0").join("out.zip");
    let options = ExportOptions::new().versions(vec!["2.0.0".parse().unwrap()]);
    export(&prj.path, &archive, &options).expect("export should work");

    let names = entry_names(&archive).unwrap();
    assert!(!names.iter().any(|name| name.starts_with("1.0.0")));
    assert!(names.contains(&"2.0.0/payload.bin".to_string()));
}

// **************
// *** import ***
// **************

#[test]
fn import_should_round_trip_export() {
    let prj = ProjectBuilder::new("round")
        .metadata(b"{\"name\":\"round\",\"bytes\":[0,1,2]}".to_vec())
        .statistics("<?php echo 1; ?>")
        .version("1.0.0")
        .version("1.2.0-beta.1")
        .build()
        .unwrap();

    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("round.zip");
    export(&prj.path, &archive, &ExportOptions::new()).unwrap();

    let target = dir.path().join("projects").join("imported");
    let config = import(&archive, &target, &ImportOptions::new("imported"))
        .expect("import should work");

    assert_eq!("imported", config.name);
    assert_eq!(target.join("imported.updproj"), config.path);
    assert_eq!(
        fs::read(&prj.metadata_file).unwrap(),
        fs::read(&config.path).unwrap(),
        "metadata should be byte for byte equal"
    );

    for version in ["1.0.0", "1.2.0-beta.1"] {
        assert_eq!(
            relative_files(&prj.path.join(version)).unwrap(),
            relative_files(&target.join(version)).unwrap(),
            "version {version} should be reproduced"
        );
        assert_eq!(
            fs::read(prj.path.join(version).join("payload.bin")).unwrap(),
            fs::read(target.join(version).join("payload.bin")).unwrap()
        );
    }

    assert_eq!(
        "<?php echo 1; ?>",
        fs::read_to_string(target.join(STATISTICS_FILE)).unwrap()
    );
    assert_no_staging_dirs(target.parent().unwrap());
}

#[test]
fn import_should_move_metadata_to_given_path() {
    let prj = ProjectBuilder::new("meta").version("1.0.0").build().unwrap();
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("meta.zip");
    export(&prj.path, &archive, &ExportOptions::new()).unwrap();

    let target = dir.path().join("target");
    let metadata_file = dir.path().join("descriptors").join("custom.updproj");
    let options = ImportOptions::new("meta").metadata_file(&metadata_file);
    let config = import(&archive, &target, &options).unwrap();

    assert_eq!(metadata_file, config.path);
    assert!(metadata_file.is_file());
    assert!(!target.join("meta.updproj").exists());
    assert!(target.join("1.0.0").is_dir());
}

#[test]
fn import_should_skip_non_version_directories() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("mixed.zip");
    write_archive(
        &archive,
        &[
            Entry::File("mixed.updproj", b"{}"),
            Entry::Dir("1.0.0/"),
            Entry::File("1.0.0/payload.bin", b"payload"),
            Entry::File("not-a-version/junk.txt", b"junk"),
            Entry::File("readme.txt", b"ignored"),
        ],
    )
    .unwrap();

    let target = dir.path().join("mixed");
    import(&archive, &target, &ImportOptions::new("mixed")).unwrap();

    assert!(target.join("1.0.0").join("payload.bin").is_file());
    assert!(!target.join("not-a-version").exists());
    assert!(!target.join("readme.txt").exists());
    assert_no_staging_dirs(dir.path());
}

#[test]
fn import_without_metadata_should_not_touch_target() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("no-meta.zip");
    write_archive(
        &archive,
        &[
            Entry::Dir("1.0.0/"),
            Entry::File("1.0.0/payload.bin", b"payload"),
        ],
    )
    .unwrap();

    let target = dir.path().join("target");
    let err = import(&archive, &target, &ImportOptions::new("target")).unwrap_err();
    match err {
        Error::Project(ProjectError::MissingMetadata(path)) => assert_eq!(archive, path),
        err => panic!("expected missing metadata error, found {err:?}"),
    }

    assert!(!target.exists(), "target should not be created");
    assert_no_staging_dirs(dir.path());
}

#[test]
fn import_without_metadata_should_leave_existing_target_unchanged() {
    let prj = ProjectBuilder::new("existing").version("0.1").build().unwrap();
    let before = relative_files(&prj.path).unwrap();

    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("no-meta.zip");
    write_archive(&archive, &[Entry::File("2.0/payload.bin", b"new")]).unwrap();

    let err = import(&archive, &prj.path, &ImportOptions::new("existing")).unwrap_err();
    assert!(err.is_missing_metadata());
    assert_eq!(before, relative_files(&prj.path).unwrap());
    assert_no_staging_dirs(prj.parent());
}

#[test]
fn import_should_error_on_multiple_metadata_files() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("two.zip");
    write_archive(
        &archive,
        &[
            Entry::File("a.updproj", b"{}"),
            Entry::File("b.updproj", b"{}"),
        ],
    )
    .unwrap();

    let target = dir.path().join("two");
    let res = import(&archive, &target, &ImportOptions::new("two"));
    assert!(matches!(
        res,
        Err(Error::Project(ProjectError::AmbiguousMetadata(_)))
    ));
    assert!(!target.exists());
}

#[test]
fn import_should_error_on_corrupt_archive() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("corrupt.zip");
    fs::write(&archive, "this is not a zip archive, but it is long enough to look like one").unwrap();

    let target = dir.path().join("corrupt");
    let res = import(&archive, &target, &ImportOptions::new("corrupt"));
    assert!(matches!(res, Err(Error::Archive(ArchiveError::Read(_)))));
    assert!(!target.exists());
    assert_no_staging_dirs(dir.path());
}

#[test]
fn import_should_error_if_archive_does_not_exist() {
    let dir = TempDir::new().unwrap();
    let res = import(
        dir.path().join("missing.zip"),
        dir.path().join("target"),
        &ImportOptions::new("target"),
    );

    assert!(matches!(res, Err(Error::NotFound(_))));
}

#[test]
fn import_should_reject_entries_escaping_staging() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("escape.zip");
    write_archive(
        &archive,
        &[
            Entry::File("escape.updproj", b"{}"),
            Entry::File("../escaped.txt", b"oops"),
        ],
    )
    .unwrap();

    let target = dir.path().join("inner").join("escape");
    let res = import(&archive, &target, &ImportOptions::new("escape"));
    assert!(matches!(
        res,
        Err(Error::Archive(ArchiveError::InvalidEntryPath(_)))
    ));
    assert!(!dir.path().join("escaped.txt").exists());
    assert!(!dir.path().join("inner").join("escaped.txt").exists());
    assert!(!target.exists());
}

#[test]
fn import_should_error_if_version_already_exists_in_target() {
    let prj = ProjectBuilder::new("clash").version("1.0.0").build().unwrap();
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("clash.zip");
    write_archive(
        &archive,
        &[
            Entry::File("clash.updproj", b"{}"),
            Entry::File("1.0.0/payload.bin", b"other"),
        ],
    )
    .unwrap();

    fs::remove_file(&prj.metadata_file).unwrap();
    let before = relative_files(&prj.path).unwrap();
    match import(&archive, &prj.path, &ImportOptions::new("clash")) {
        Err(Error::Io(err)) => assert_eq!(io::ErrorKind::AlreadyExists, err.kind()),
        res => panic!("expected already exists error, found {res:?}"),
    }

    assert_eq!(before, relative_files(&prj.path).unwrap());
}

#[test]
fn import_should_reject_invalid_names() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("a.zip");
    write_archive(&archive, &[Entry::File("a.updproj", b"{}")]).unwrap();

    let res = import(&archive, dir.path().join("a"), &ImportOptions::new(""));
    assert!(matches!(res, Err(Error::Core(_))));
}

#[cfg(unix)]
#[test]
fn import_should_keep_file_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let prj = ProjectBuilder::new("modes").version("1.0.0").build().unwrap();
    let exe = prj.path.join("1.0.0").join("run.sh");
    fs::write(&exe, "#!/bin/sh\n").unwrap();
    fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();

    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("modes.zip");
    export(&prj.path, &archive, &ExportOptions::new()).unwrap();

    let target = dir.path().join("modes");
    import(&archive, &target, &ImportOptions::new("modes")).unwrap();

    let mode = fs::metadata(target.join("1.0.0").join("run.sh"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(0o755, mode & 0o777);
}

#[test]
fn rollback_should_remove_created_directories_and_partial_moves() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("target");
    let metadata_dir = dir.path().join("descriptors").join("nested");
    {
        let mut rollback = Rollback::default();
        rollback.create_dir_all(&target).unwrap();
        rollback.create_dir_all(&metadata_dir).unwrap();

        let partial = target.join("1.0.0");
        rollback.moved.push(partial.clone());
        fs::create_dir_all(partial.join("files")).unwrap();
        fs::write(partial.join("files").join("half.bin"), "half").unwrap();

        // recorded but never created
        rollback.moved.push(target.join("2.0.0"));
    }

    assert!(!target.exists(), "target should be removed");
    assert!(
        !dir.path().join("descriptors").exists(),
        "outermost created parent should be removed"
    );
}

#[test]
fn rollback_should_keep_existing_directories() {
    let dir = TempDir::new().unwrap();
    let existing = dir.path().join("existing");
    fs::create_dir(&existing).unwrap();
    fs::write(existing.join("keep.txt"), "keep").unwrap();
    {
        let mut rollback = Rollback::default();
        rollback.create_dir_all(&existing).unwrap();
        rollback.create_dir_all(&existing.join("new")).unwrap();
    }

    assert!(existing.join("keep.txt").is_file());
    assert!(!existing.join("new").exists());
}

#[test]
fn rollback_should_do_nothing_once_committed() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("target");
    {
        let mut rollback = Rollback::default();
        rollback.create_dir_all(&target).unwrap();
        rollback.commit();
    }

    assert!(target.is_dir());
}

// *****************
// *** discovery ***
// *****************

#[test]
fn find_metadata_file_should_prefer_file_named_after_directory() {
    let prj = ProjectBuilder::new("pref").build().unwrap();
    fs::write(prj.path.join("other.updproj"), "{}").unwrap();

    let found = find_metadata_file(&prj.path).unwrap();
    assert_eq!(Some(prj.metadata_file.clone()), found);
}

#[test]
fn find_metadata_file_should_error_if_ambiguous() {
    let prj = ProjectBuilder::new("ambiguous").without_metadata().build().unwrap();
    fs::write(prj.path.join("a.updproj"), "{}").unwrap();
    fs::write(prj.path.join("b.updproj"), "{}").unwrap();

    assert!(matches!(
        find_metadata_file(&prj.path),
        Err(Error::Project(ProjectError::AmbiguousMetadata(_)))
    ));
}

#[test]
fn versions_of_should_return_sorted_versions() {
    let prj = ProjectBuilder::new("sorted")
        .version("1.10.0")
        .version("1.9.0")
        .other_dir("assets")
        .build()
        .unwrap();

    let versions = versions_of(&prj.path)
        .unwrap()
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>();

    assert_eq!(vec!["1.9.0", "1.10.0"], versions);
}

// ************************
// *** helper functions ***
// ************************

fn assert_no_staging_dirs(dir: &Path) {
    for entry in fs::read_dir(dir).unwrap() {
        let name = entry.unwrap().file_name();
        assert!(
            !name.to_string_lossy().starts_with(STAGING_DIR_PREFIX),
            "staging directory {name:?} should be removed"
        );
    }
}
