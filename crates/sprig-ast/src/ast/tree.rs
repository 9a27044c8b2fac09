//! Indented tree debug form.
//!
//! ```text
//! Add()
//! ├── left=Int(val=1)
//! └── right=Juxtapose(level=call)
//!     ├── left=Identifier(name=f)
//!     └── right=Identifier(name=x)
//! ```

use std::fmt;

use super::{Ast, Member};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Displays an [`Ast`] in tree form. Created by [`Ast::tree`].
pub struct TreeDisplay<'a>(&'a Ast);

impl Ast {
    pub fn tree(&self) -> TreeDisplay<'_> {
        TreeDisplay(self)
    }
}

impl fmt::Display for TreeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self.0, "")
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Ast, prefix: &str) -> fmt::Result {
    let members = node.members();

    // header line: name plus every plain value inline
    write!(f, "{}(", node.name())?;
    let mut first = true;
    for member in &members {
        if let Member::Value(name, value) = member {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
            first = false;
        }
    }
    f.write_str(")")?;

    // container items carry no label
    let mut children: Vec<(Option<&str>, &Ast)> = Vec::new();
    for member in &members {
        match member {
            Member::Child(name, child) => children.push((Some(*name), *child)),
            Member::Children(_, items) => children.extend(items.iter().map(|item| (None, item))),
            Member::Value(..) => {}
        }
    }

    let count = children.len();
    for (i, (label, child)) in children.into_iter().enumerate() {
        let last = i + 1 == count;
        let connector = if last { LAST_BRANCH } else { BRANCH };
        write!(f, "\n{prefix}{connector}")?;
        if let Some(label) = label {
            write!(f, "{label}=")?;
        }
        let extension = if last { SPACE } else { PIPE };
        write_node(f, child, &format!("{prefix}{extension}"))?;
    }
    Ok(())
}
