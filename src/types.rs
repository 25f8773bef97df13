/// Kind of a remote directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    Other,
}

/// One entry of a remote directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub name: String,
    pub kind: EntryKind,
    /// Size in bytes; 0 for directories and entries whose listing line
    /// carries no usable size field.
    pub size: u64,
}

impl RemoteEntry {
    /// Parses one line of LIST output. Recognizes Unix-style and DOS-style
    /// formats; anything else (e.g. a `total 42` header) yields `None`.
    pub(crate) fn parse(line: &str) -> Option<Self> {
        match line.chars().next()? {
            'd' | '-' | 'l' => Self::parse_unix(line),
            _ => Self::parse_dos(line),
        }
    }

    // drwxr-xr-x  2 user group  4096 Jan  1 12:00 name
    fn parse_unix(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 9 {
            return None;
        }

        let kind = match parts[0].chars().next()? {
            'd' => EntryKind::Directory,
            'l' => EntryKind::Symlink,
            '-' => EntryKind::File,
            _ => EntryKind::Other,
        };
        let size = parts[4].parse().unwrap_or(0);

        // The name starts at the ninth column and may contain spaces.
        let name = parts[8..].join(" ");
        // Symlinks list as "name -> target".
        let name = if kind == EntryKind::Symlink {
            name.split(" -> ").next().unwrap_or("").to_string()
        } else {
            name
        };
        if name.is_empty() {
            return None;
        }

        Some(Self { name, kind, size })
    }

    // 01-01-24  12:00PM       <DIR>          dirname
    // 01-01-24  12:00PM              12345   filename.txt
    fn parse_dos(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            return None;
        }

        if let Some(pos) = parts.iter().position(|&p| p == "<DIR>") {
            let name = parts.get(pos + 1..)?.join(" ");
            if name.is_empty() {
                return None;
            }
            return Some(Self {
                name,
                kind: EntryKind::Directory,
                size: 0,
            });
        }

        let size = parts[2].parse().ok()?;
        let name = parts[3..].join(" ");
        Some(Self {
            name,
            kind: EntryKind::File,
            size,
        })
    }
}
