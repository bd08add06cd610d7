use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use twig::areas::config::StoreConfig;
use twig::areas::repository::Repository;
use twig::artifacts::merge::content_merge::{ContentMerger, Diff3Merger, WholeFileMerger};
use twig::artifacts::objects::object_type::ObjectType;
use twig::commands::porcelain::log::LogEntry;
use twig::commands::porcelain::merge::MergeOutcome;

const LOG_ENV: &str = "TWIG_LOG";

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    about = "A tiny content-addressed version control store",
    long_about = "twig snapshots a directory into content-addressed objects, \
    names snapshots with branches and tags, and merges divergent histories.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum MergeTool {
    /// Take the changed side, or wrap whole files in conflict markers
    Whole,
    /// Line-based merge through an external `diff3 -m`
    Diff3,
}

#[derive(Clone, Copy, ValueEnum)]
enum ObjectKind {
    Blob,
    Tree,
    Commit,
}

impl From<ObjectKind> for ObjectType {
    fn from(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Blob => ObjectType::Blob,
            ObjectKind::Tree => ObjectType::Tree,
            ObjectKind::Commit => ObjectType::Commit,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Create an empty store in the current directory")]
    Init,
    #[command(
        name = "hash-object",
        about = "Hash a file as a blob and optionally store it"
    )]
    HashObject {
        #[arg(short, long, help = "Write the blob to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(name = "cat-file", about = "Print the payload of an object")]
    CatFile {
        #[arg(index = 1, help = "Object id or revision")]
        object: String,
        #[arg(short = 't', long = "type", help = "Fail unless the object has this type")]
        object_type: Option<ObjectKind>,
    },
    #[command(name = "write-tree", about = "Store the working directory as a tree")]
    WriteTree,
    #[command(
        name = "read-tree",
        about = "Replace the working directory with a stored tree"
    )]
    ReadTree {
        #[arg(index = 1)]
        tree: String,
    },
    #[command(name = "commit", about = "Record the working directory as a new commit")]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show history reachable from a commit")]
    Log {
        #[arg(index = 1, help = "Start revision, HEAD by default")]
        revision: Option<String>,
        #[arg(long, help = "One line per commit")]
        oneline: bool,
    },
    #[command(name = "show", about = "Show a commit and the paths it changed")]
    Show {
        #[arg(index = 1, help = "Revision to show, HEAD by default")]
        revision: Option<String>,
    },
    #[command(name = "checkout", about = "Switch to a branch or detach at a commit")]
    Checkout {
        #[arg(index = 1)]
        revision: String,
    },
    #[command(name = "tag", about = "Create or list tags")]
    Tag {
        #[arg(index = 1)]
        name: Option<String>,
        #[arg(index = 2, help = "Tagged revision, HEAD by default")]
        target: Option<String>,
    },
    #[command(name = "branch", about = "Create, delete or list branches")]
    Branch {
        #[arg(index = 1)]
        name: Option<String>,
        #[arg(index = 2, help = "Start revision, HEAD by default")]
        start: Option<String>,
        #[arg(short, long, help = "Delete the named branch")]
        delete: bool,
    },
    #[command(name = "status", about = "Show the branch and changed files")]
    Status,
    #[command(name = "diff", about = "List paths changed between commits or the working tree")]
    Diff {
        #[arg(index = 1, help = "Old revision, HEAD by default")]
        from: Option<String>,
        #[arg(index = 2, help = "New revision, the working directory by default")]
        to: Option<String>,
    },
    #[command(name = "reset", about = "Move the current branch to a commit")]
    Reset {
        #[arg(index = 1)]
        revision: String,
    },
    #[command(name = "merge", about = "Merge a commit into HEAD")]
    Merge {
        #[arg(index = 1)]
        revision: String,
        #[arg(long, value_enum, default_value = "whole", help = "Per-file merge strategy")]
        tool: MergeTool,
    },
    #[command(name = "merge-base", about = "Print the common ancestor of two commits")]
    MergeBase {
        #[arg(index = 1)]
        left: String,
        #[arg(index = 2)]
        right: String,
    },
    #[command(name = "rev-parse", about = "Resolve a revision to an object id")]
    RevParse {
        #[arg(index = 1)]
        revision: String,
    },
    #[command(name = "update-ref", about = "Point a ref at a revision")]
    UpdateRef {
        #[arg(index = 1)]
        name: String,
        #[arg(index = 2)]
        target: String,
    },
    #[command(name = "show-ref", about = "List refs and the ids they resolve to")]
    ShowRef,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let pwd = std::env::current_dir().context("failed to read the current directory")?;
    let repository = Repository::open(StoreConfig::load_from_env(pwd))?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Init => {
            repository.init()?;
            writeln!(
                stdout,
                "Initialized empty twig store in {}",
                repository.config().store_path().display()
            )?;
        }
        Commands::HashObject { write, file } => {
            let oid = repository
                .hash_object(&file, write)
                .with_context(|| format!("failed to hash {}", file.display()))?;
            writeln!(stdout, "{oid}")?;
        }
        Commands::CatFile {
            object,
            object_type,
        } => {
            let payload = repository.cat_file(&object, object_type.map(ObjectType::from))?;
            stdout.write_all(&payload)?;
        }
        Commands::WriteTree => writeln!(stdout, "{}", repository.write_tree()?)?,
        Commands::ReadTree { tree } => {
            let oid = repository.get_oid(&tree)?;
            repository.read_tree(&oid)?;
        }
        Commands::Commit { message } => {
            let is_root = repository.head_oid()?.is_none();
            let oid = repository.commit(&message)?;
            let commit = repository.get_commit(&oid)?;
            writeln!(
                stdout,
                "[{}{}] {}",
                if is_root { "(root-commit) " } else { "" },
                oid.to_short_oid(),
                commit.short_message()
            )?;
        }
        Commands::Log { revision, oneline } => {
            for entry in repository.log(revision.as_deref())? {
                print_log_entry(&mut stdout, &entry?, oneline)?;
            }
        }
        Commands::Show { revision } => {
            let details = repository.show(revision.as_deref())?;
            let entry = LogEntry {
                oid: details.oid,
                commit: details.commit,
                refs: Vec::new(),
            };
            print_log_entry(&mut stdout, &entry, false)?;
            for change in &details.changes {
                writeln!(stdout, "{}\t{}", change.kind.status_code(), change.path.display())?;
            }
        }
        Commands::Checkout { revision } => {
            repository.checkout(&revision)?;
            match repository.get_branch_name()? {
                Some(branch) => writeln!(stdout, "Switched to branch '{branch}'")?,
                None => writeln!(stdout, "HEAD is now at {}", repository.get_oid("@")?.to_short_oid())?,
            }
        }
        Commands::Tag { name, target } => match name {
            Some(name) => {
                repository.create_tag(&name, target.as_deref())?;
            }
            None => {
                for tag in repository.list_tags()? {
                    writeln!(stdout, "{tag}")?;
                }
            }
        },
        Commands::Branch {
            name,
            start,
            delete,
        } => match (name, delete) {
            (Some(name), true) => {
                repository.delete_branch(&name)?;
                writeln!(stdout, "Deleted branch {name}")?;
            }
            (Some(name), false) => {
                let oid = repository.create_branch(&name, start.as_deref())?;
                writeln!(stdout, "Branch {name} created at {}", oid.to_short_oid())?;
            }
            (None, true) => anyhow::bail!("branch name required"),
            (None, false) => {
                let current = repository.get_branch_name()?;
                for branch in repository.iter_branch_names()? {
                    if current.as_ref() == Some(&branch) {
                        writeln!(stdout, "* {}", branch.to_string().green())?;
                    } else {
                        writeln!(stdout, "  {branch}")?;
                    }
                }
            }
        },
        Commands::Status => {
            let status = repository.status()?;
            match (&status.branch, &status.head) {
                (Some(branch), _) => writeln!(stdout, "On branch {branch}")?,
                (None, Some(head)) => writeln!(stdout, "HEAD detached at {}", head.to_short_oid())?,
                (None, None) => writeln!(stdout, "HEAD detached")?,
            }
            if let Some(merge_head) = &status.merge_head {
                writeln!(stdout, "Merging with {}", merge_head.to_short_oid())?;
            }
            if !status.changes.is_empty() {
                writeln!(stdout, "\nChanges since HEAD:")?;
                for (path, kind) in &status.changes {
                    writeln!(stdout, "\t{}", format!("{kind:>12}: {}", path.display()).red())?;
                }
            }
        }
        Commands::Diff { from, to } => {
            for change in repository.diff(from.as_deref(), to.as_deref())? {
                writeln!(stdout, "{}\t{}", change.kind.status_code(), change.path.display())?;
            }
        }
        Commands::Reset { revision } => {
            let oid = repository.reset(&revision)?;
            writeln!(stdout, "HEAD is now at {}", oid.to_short_oid())?;
        }
        Commands::Merge { revision, tool } => {
            let merger: Box<dyn ContentMerger> = match tool {
                MergeTool::Whole => Box::new(WholeFileMerger),
                MergeTool::Diff3 => Box::new(Diff3Merger::default()),
            };

            match repository.merge(&revision, merger.as_ref())? {
                MergeOutcome::UpToDate => writeln!(stdout, "Already up to date.")?,
                MergeOutcome::FastForward { from, to } => writeln!(
                    stdout,
                    "Updating {}..{}\nFast-forward",
                    from.to_short_oid(),
                    to.to_short_oid()
                )?,
                MergeOutcome::Merged { .. } => writeln!(
                    stdout,
                    "Merged {revision} into the working tree; commit the result to conclude the merge."
                )?,
            }
        }
        Commands::MergeBase { left, right } => match repository.merge_base(&left, &right)? {
            Some(base) => writeln!(stdout, "{base}")?,
            None => anyhow::bail!("no common ancestor between {left} and {right}"),
        },
        Commands::RevParse { revision } => writeln!(stdout, "{}", repository.get_oid(&revision)?)?,
        Commands::UpdateRef { name, target } => {
            repository.update_ref(&name, &target)?;
        }
        Commands::ShowRef => {
            for (name, oid) in repository.show_refs("")? {
                writeln!(stdout, "{oid} {name}")?;
            }
        }
    }

    Ok(())
}

fn print_log_entry(out: &mut impl Write, entry: &LogEntry, oneline: bool) -> Result<()> {
    let decoration = if entry.refs.is_empty() {
        String::new()
    } else {
        let names = entry
            .refs
            .iter()
            .map(|name| name.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!(" ({})", names.cyan())
    };

    if oneline {
        writeln!(
            out,
            "{}{} {}",
            entry.oid.to_short_oid().yellow(),
            decoration,
            entry.commit.short_message()
        )?;
        return Ok(());
    }

    writeln!(out, "{}{}", format!("commit {}", entry.oid).yellow(), decoration)?;
    for parent in entry.commit.parents().iter().skip(1) {
        writeln!(out, "Merge:  {}", parent.to_short_oid())?;
    }
    writeln!(out)?;
    for line in entry.commit.message().lines() {
        writeln!(out, "    {line}")?;
    }
    writeln!(out)?;

    Ok(())
}
