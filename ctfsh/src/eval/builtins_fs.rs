use super::CmdResult;
use crate::error::{CommandError, Reason};
use crate::shell::Shell;
use ctf_core::{FsError, FsResult, NodePath};

impl Shell {
    fn resolve_path(&self, path: &str) -> FsResult<NodePath> {
        self.tree.resolve(self.session.cwd(), path)
    }

    /// The optional directory argument of `ls` and `tree`.
    fn target_dir(&self, args: &[&str]) -> FsResult<NodePath> {
        args.first()
            .map_or_else(|| Ok(self.session.cwd().clone()), |path| self.resolve_path(path))
    }

    pub(super) fn cmd_ls(&self, args: &[&str]) -> CmdResult {
        let entries = self
            .target_dir(args)
            .and_then(|dir| self.tree.list(&dir))
            .map_err(|_| CommandError::NoSuchDirectory)?;
        let names: Vec<String> = entries.into_iter().map(|e| e.name).collect();
        Ok(names.join("  "))
    }

    pub(super) fn cmd_cd(&mut self, args: &[&str]) -> CmdResult {
        let Some(path) = args.first() else {
            return Err(CommandError::Usage("cd <directory>"));
        };
        match self.resolve_path(path) {
            Ok(target) if self.tree.is_dir(&target) => {
                self.session.set_cwd(target);
                Ok(String::new())
            }
            _ => Err(CommandError::Cd((*path).to_string())),
        }
    }

    pub(super) fn cmd_cat(&self, args: &[&str]) -> CmdResult {
        let Some(path) = args.first() else {
            return Err(CommandError::Usage("cat <file>"));
        };
        self.resolve_path(path)
            .and_then(|target| self.tree.read_file(&target).map(str::to_string))
            .map_err(|_| CommandError::Cat((*path).to_string()))
    }

    pub(super) fn cmd_touch(&mut self, args: &[&str]) -> CmdResult {
        let Some(name) = args.first() else {
            return Err(CommandError::Usage("touch <file>"));
        };
        self.tree
            .resolve_entry(self.session.cwd(), name)
            .and_then(|target| self.tree.create_file(&target, String::new()))
            .map_err(|e| CommandError::Touch {
                name: (*name).to_string(),
                reason: create_reason(&e),
            })?;
        Ok(String::new())
    }

    pub(super) fn cmd_mkdir(&mut self, args: &[&str]) -> CmdResult {
        let Some(name) = args.first() else {
            return Err(CommandError::Usage("mkdir <dir>"));
        };
        self.tree
            .resolve_entry(self.session.cwd(), name)
            .and_then(|target| self.tree.create_dir(&target))
            .map_err(|e| CommandError::Mkdir {
                name: (*name).to_string(),
                reason: create_reason(&e),
            })?;
        Ok(String::new())
    }

    pub(super) fn cmd_rm(&mut self, args: &[&str]) -> CmdResult {
        let Some(name) = args.first() else {
            return Err(CommandError::Usage("rm <file>"));
        };
        self.resolve_path(name)
            .and_then(|target| self.tree.remove_file(&target))
            .map_err(|e| CommandError::Rm {
                name: (*name).to_string(),
                reason: match e {
                    FsError::IsDirectory(_) => Reason::IsDirectory,
                    _ => Reason::NoSuchFile,
                },
            })?;
        Ok(String::new())
    }

    pub(super) fn cmd_rmdir(&mut self, args: &[&str]) -> CmdResult {
        let Some(name) = args.first() else {
            return Err(CommandError::Usage("rmdir <dir>"));
        };
        let rmdir_error = |e: FsError| CommandError::Rmdir {
            name: (*name).to_string(),
            reason: match e {
                FsError::NotDirectory(_) => Reason::NotDirectory,
                FsError::DirectoryNotEmpty(_) => Reason::DirectoryNotEmpty,
                FsError::Busy(_) => Reason::Busy,
                _ => Reason::NoSuchDirectory,
            },
        };
        let target = self.resolve_path(name).map_err(rmdir_error)?;

        // The working directory must keep resolving to a directory.
        if self.tree.is_dir(&target) && self.session.cwd().starts_with(&target) {
            return Err(rmdir_error(FsError::busy(target.to_string())));
        }
        self.tree.remove_dir(&target).map_err(rmdir_error)?;
        Ok(String::new())
    }

    pub(super) fn cmd_tree(&self, args: &[&str]) -> CmdResult {
        self.target_dir(args)
            .and_then(|dir| self.tree.render_tree(&dir))
            .map_err(|_| CommandError::NoSuchDirectory)
    }
}

fn create_reason(err: &FsError) -> Reason {
    match err {
        FsError::AlreadyExists(_) => Reason::FileExists,
        FsError::NotDirectory(_) => Reason::NotDirectory,
        _ => Reason::NoSuchFileOrDirectory,
    }
}
