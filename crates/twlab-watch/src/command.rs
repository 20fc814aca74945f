//! Launch description for the supervised process

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use twlab_core::ToolOptions;

/// Program, arguments and working directory of a watch process.
///
/// `output_path` names the file the process writes; its parent directories
/// are created before launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchCommand {
    program: PathBuf,
    args: Vec<OsString>,
    working_dir: PathBuf,
    output_path: Option<PathBuf>,
}

impl WatchCommand {
    pub fn new(program: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: working_dir.into(),
            output_path: None,
        }
    }

    /// `tailwindcss -i <input> -o <output> --watch [extra_args...]`, run from
    /// the content root with both paths resolved against it
    pub fn tailwind(binary: &Path, options: &ToolOptions, content_root: &Path) -> Self {
        let input = content_root.join(&options.input_file);
        let output = content_root.join(&options.output_file);

        Self::new(binary, content_root)
            .arg("-i")
            .arg(&input)
            .arg("-o")
            .arg(&output)
            .arg("--watch")
            .args(&options.extra_args)
            .output_path(output)
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn get_output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tailwind_arguments() {
        let options = ToolOptions {
            input_file: "styles/app.css".into(),
            output_file: "wwwroot/css/site.css".into(),
            extra_args: vec!["--minify".to_string()],
            ..Default::default()
        };
        let root = Path::new("/srv/site");
        let command = WatchCommand::tailwind(Path::new("/cache/tailwindcss"), &options, root);

        let args: Vec<&OsStr> = command.get_args().iter().map(OsString::as_os_str).collect();
        assert_eq!(
            args,
            [
                OsStr::new("-i"),
                root.join("styles/app.css").as_os_str(),
                OsStr::new("-o"),
                root.join("wwwroot/css/site.css").as_os_str(),
                OsStr::new("--watch"),
                OsStr::new("--minify"),
            ]
        );
        assert_eq!(command.program(), Path::new("/cache/tailwindcss"));
        assert_eq!(command.working_dir(), root);
        assert_eq!(
            command.get_output_path(),
            Some(root.join("wwwroot/css/site.css").as_path())
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_absolute_paths_are_kept() {
        let options = ToolOptions {
            input_file: "/abs/in.css".into(),
            output_file: "/abs/out/site.css".into(),
            ..Default::default()
        };
        let command =
            WatchCommand::tailwind(Path::new("tailwindcss"), &options, Path::new("/srv/site"));

        assert_eq!(command.get_args()[1], OsString::from("/abs/in.css"));
        assert_eq!(command.get_output_path(), Some(Path::new("/abs/out/site.css")));
    }

    #[test]
    fn test_plain_command_has_no_output() {
        let command = WatchCommand::new("sh", ".").args(["-c", "true"]);
        assert_eq!(command.get_args().len(), 2);
        assert!(command.get_output_path().is_none());
    }
}
