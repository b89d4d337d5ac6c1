//! Tab completion for command names and remote paths
//!
//! Candidates come from `ls -1` probes run through the session's exec
//! function. A probe that fails contributes nothing; completion never
//! reports errors to the user.

use crate::Result;

/// Common utilities offered before anything found on the remote PATH
const COMMON_COMMANDS: &[&str] = &[
    "ls", "cd", "pwd", "cat", "less", "more", "head", "tail", "grep", "find", "which",
    "whereis", "type", "command", "echo", "printf", "date", "whoami", "id", "groups", "ps",
    "top", "htop", "kill", "killall", "pkill", "df", "du", "mount", "umount", "fdisk", "blkid",
    "ip", "ifconfig", "netstat", "ss", "ping", "traceroute", "curl", "wget", "nc", "telnet",
    "ssh", "scp", "tar", "gzip", "bzip2", "zip", "unzip", "vim", "nano", "emacs", "sed", "awk",
    "sort", "uniq", "cut", "paste", "join", "split", "tr", "wc", "chmod", "chown", "chgrp",
    "umask", "touch", "mkdir", "rmdir", "cp", "mv", "rm", "ln", "stat", "file", "strings",
    "env", "export", "unset", "set", "alias", "unalias", "history", "fc", "jobs", "bg", "fg",
    "wait", "sleep", "timeout", "watch", "nohup", "screen", "tmux", "docker", "kubectl", "helm",
    "git", "svn", "hg", "python", "python3", "node", "npm", "java", "javac", "gcc", "g++",
    "make", "cmake", "autoconf", "automake", "yum", "apt", "dnf", "pacman", "brew", "snap",
    "systemctl", "service", "init", "systemd", "upstart", "cron", "at", "batch", "anacron",
    "logrotate", "rsync", "sftp", "ftp", "tftp", "ncftp", "mysql", "psql", "sqlite3",
    "redis-cli", "mongo", "nginx", "apache2ctl", "httpd", "lighttpd", "caddy", "fail2ban",
    "iptables", "ufw", "firewalld", "selinux", "auditd", "logwatch", "logcheck", "swatch",
    "logsurfer", "tcpdump", "wireshark", "nmap", "netcat", "socat", "strace", "ltrace", "gdb",
    "valgrind", "perf",
];

/// Directories listed for executable names
const PATH_DIRS: &[&str] = &[
    "/usr/bin",
    "/usr/sbin",
    "/bin",
    "/sbin",
    "/usr/local/bin",
    "/usr/local/sbin",
];

/// A single completion candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub is_dir: bool,
}

impl Candidate {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }

    /// Name as shown and inserted: directories carry a trailing `/`
    pub fn display(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// What a Tab press does to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Leave the input alone
    Unchanged,
    /// Replace the input text
    Replace(String),
    /// Leave the input alone and print this listing
    Listing(String),
}

/// Kind of token being completed, which decides the listing format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Command,
    Path,
}

/// Runs `ls`-style probes in the container
pub trait Probe {
    fn run(&mut self, argv: &[String]) -> Result<String>;
}

impl<F> Probe for F
where
    F: FnMut(&[String]) -> Result<String>,
{
    fn run(&mut self, argv: &[String]) -> Result<String> {
        self(argv)
    }
}

/// Complete the last token of `input`
pub fn complete(input: &str, probe: &mut dyn Probe) -> Completion {
    if input.is_empty() {
        return Completion::Unchanged;
    }

    let words: Vec<&str> = input.split_whitespace().collect();
    let Some(last) = words.last().copied() else {
        return Completion::Unchanged;
    };

    if input.ends_with(char::is_whitespace) {
        let candidates = path_candidates(probe, ".", "");
        if candidates.is_empty() {
            return Completion::Unchanged;
        }
        return resolve(input, "", &candidates, Target::Path);
    }

    if words.len() == 1 {
        let commands = command_candidates(probe, last);
        if !commands.is_empty() {
            return resolve(input, last, &commands, Target::Command);
        }
    }

    let (dir, partial) = parse_path(last);
    let candidates = path_candidates(probe, &dir, &partial);
    if candidates.is_empty() {
        return Completion::Replace(format!("{} ", input));
    }
    resolve(input, &partial, &candidates, Target::Path)
}

fn resolve(input: &str, partial: &str, candidates: &[Candidate], target: Target) -> Completion {
    let base = input.strip_suffix(partial).unwrap_or(input);

    if let [only] = candidates {
        let text = if only.is_dir {
            format!("{}{}", base, only.display())
        } else {
            format!("{}{} ", base, only.name)
        };
        return Completion::Replace(text);
    }

    let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
    let prefix = common_prefix(&names);
    if prefix.len() > partial.len() {
        return Completion::Replace(format!("{}{}", base, prefix));
    }

    Completion::Listing(match target {
        Target::Command => render_command_listing(candidates),
        Target::Path => render_path_listing(candidates),
    })
}

/// Split a path token into `(directory, partial name)`
pub fn parse_path(token: &str) -> (String, String) {
    if token.is_empty() {
        return (".".to_string(), String::new());
    }

    if token.starts_with('/') {
        // starts_with('/') guarantees a slash
        let idx = token.rfind('/').unwrap_or(0);
        let dir = if idx == 0 { "/" } else { &token[..idx] };
        return (dir.to_string(), token[idx + 1..].to_string());
    }

    let token = token.strip_prefix("./").unwrap_or(token);
    match token.rfind('/') {
        None => (".".to_string(), token.to_string()),
        Some(0) => (".".to_string(), token[1..].to_string()),
        Some(idx) => (token[..idx].to_string(), token[idx + 1..].to_string()),
    }
}

/// Longest shared prefix, compared byte-wise and clipped to a char boundary
pub fn common_prefix<'a>(names: &[&'a str]) -> &'a str {
    let Some((first, rest)) = names.split_first() else {
        return "";
    };

    let mut len = first.len();
    for name in rest {
        len = first
            .bytes()
            .zip(name.bytes())
            .take(len)
            .take_while(|(a, b)| a == b)
            .count();
    }

    while !first.is_char_boundary(len) {
        len -= 1;
    }
    &first[..len]
}

/// Command vocabulary plus PATH listings matching `partial`
pub fn command_candidates(probe: &mut dyn Probe, partial: &str) -> Vec<Candidate> {
    let mut names: Vec<String> = COMMON_COMMANDS
        .iter()
        .filter(|c| c.starts_with(partial))
        .map(|c| c.to_string())
        .collect();

    for dir in PATH_DIRS {
        names.extend(
            list_dir(probe, dir)
                .into_iter()
                .filter(|entry| entry.starts_with(partial)),
        );
    }

    dedup_preserving_order(names)
        .into_iter()
        .map(Candidate::file)
        .collect()
}

/// Entries of `dir` starting with `partial`, each probed for directory-ness
pub fn path_candidates(probe: &mut dyn Probe, dir: &str, partial: &str) -> Vec<Candidate> {
    list_dir(probe, dir)
        .into_iter()
        .filter(|entry| entry.starts_with(partial))
        .map(|entry| {
            let is_dir = is_directory(probe, dir, &entry);
            Candidate {
                name: entry,
                is_dir,
            }
        })
        .collect()
}

fn list_dir(probe: &mut dyn Probe, dir: &str) -> Vec<String> {
    match probe.run(&ls_argv(dir)) {
        Ok(output) => output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        Err(e) => {
            tracing::trace!("listing {} failed: {}", dir, e);
            Vec::new()
        }
    }
}

fn is_directory(probe: &mut dyn Probe, dir: &str, entry: &str) -> bool {
    let path = match dir {
        "." => entry.to_string(),
        "/" => format!("/{}", entry),
        _ => format!("{}/{}", dir, entry),
    };
    probe.run(&ls_argv(&path)).is_ok()
}

fn ls_argv(path: &str) -> Vec<String> {
    vec!["ls".to_string(), "-1".to_string(), path.to_string()]
}

fn dedup_preserving_order(names: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

fn render_path_listing(candidates: &[Candidate]) -> String {
    let mut out = String::from("\nAvailable completions:\n");

    let (dirs, files): (Vec<&Candidate>, Vec<&Candidate>) =
        candidates.iter().partition(|c| c.is_dir);

    if !dirs.is_empty() {
        out.push_str("Directories:\n");
        for dir in dirs {
            out.push_str(&format!("  {}\n", dir.display()));
        }
    }
    if !files.is_empty() {
        out.push_str("Files:\n");
        for file in files {
            out.push_str(&format!("  {}\n", file.name));
        }
    }

    out.push('\n');
    out
}

fn render_command_listing(candidates: &[Candidate]) -> String {
    let mut out = String::from("\nAvailable commands:\n");
    for cmd in candidates {
        out.push_str(&format!("  {}\n", cmd.name));
    }
    out.push('\n');
    out
}
