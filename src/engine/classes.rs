use regex::Regex;

use super::category::Category;
use super::sink::ErrorSink;

/// One class or struct currently being scanned.
struct ClassInfo {
    name: String,
    linenum: usize,
    seen_open_brace: bool,
    is_derived: bool,
    first_virtual_line: Option<usize>,
    has_destructor: bool,
    brace_depth: i32,
}

impl ClassInfo {
    fn new(name: &str, linenum: usize) -> Self {
        Self {
            name: name.to_string(),
            linenum,
            seen_open_brace: false,
            is_derived: false,
            first_virtual_line: None,
            has_destructor: false,
            brace_depth: 0,
        }
    }
}

/// Scans class bodies for virtual methods that lack a destructor.
///
/// Declarations nest on a stack; only the innermost class is examined
/// per line. A `;` before the opening brace is a forward declaration
/// and drops the entry; derived classes are exempt because the base may
/// own the virtual destructor.
pub struct ClassStructureTracker {
    decl_re: Regex,
    derived_re: Regex,
    virtual_re: Regex,
    stack: Vec<ClassInfo>,
}

impl Default for ClassStructureTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassStructureTracker {
    /// # Panics
    /// Panics if the built-in regexes fail to compile.
    #[must_use]
    pub fn new() -> Self {
        Self {
            // All-caps tokens after the keyword are attribute macros
            // (LOCKABLE, API, ...), not the class name.
            decl_re: Regex::new(
                r"^\s*(?:template\s*<[\w\s<>,:]*>\s*)?(?:class|struct)\s+(?:[A-Z_]+\s+)*(\w+(?:::\w+)*)",
            )
            .expect("Invalid regex"),
            derived_re: Regex::new(r"(?:^|[^:]):(?:$|[^:])").expect("Invalid regex"),
            virtual_re: Regex::new(r"\bvirtual\b").expect("Invalid regex"),
            stack: Vec::new(),
        }
    }

    /// Feeds one comment-stripped line to the tracker.
    pub fn check_line(&mut self, line: &str, linenum: usize, sink: &mut ErrorSink) {
        if let Some(caps) = self.decl_re.captures(line) {
            self.stack.push(ClassInfo::new(&caps[1], linenum));
        }

        let Some(info) = self.stack.last_mut() else {
            return;
        };

        if !info.seen_open_brace {
            if line.contains(';') {
                self.stack.pop();
                return;
            }
            info.seen_open_brace = line.contains('{');
            if self.derived_re.is_match(line) {
                info.is_derived = true;
            }
            if !info.seen_open_brace {
                return;
            }
        }

        let base_name = info.name.rsplit("::").next().unwrap_or(&info.name);
        if has_destructor_of(line, base_name) {
            info.has_destructor = true;
        } else if info.first_virtual_line.is_none() && self.virtual_re.is_match(line) {
            info.first_virtual_line = Some(linenum);
        }

        let opens = i32::try_from(line.matches('{').count()).unwrap_or(i32::MAX);
        let closes = i32::try_from(line.matches('}').count()).unwrap_or(i32::MAX);
        info.brace_depth += opens - closes;
        if info.brace_depth <= 0
            && let Some(info) = self.stack.pop()
        {
            if let Some(virtual_line) = info.first_virtual_line {
                if !info.has_destructor && !info.is_derived {
                    sink.error(
                        virtual_line,
                        Category::RuntimeVirtual,
                        4,
                        &format!(
                            "The class {} probably needs a virtual destructor due to having \
                             virtual method(s), one declared at line {virtual_line}.",
                            info.name
                        ),
                    );
                }
            }
        }
    }

    /// Reports the outermost class still open at end of file.
    pub fn check_finished(&self, sink: &mut ErrorSink) {
        if let Some(info) = self.stack.first() {
            sink.error(
                info.linenum,
                Category::BuildClass,
                5,
                &format!("Failed to find complete declaration of class {}", info.name),
            );
        }
    }
}

/// Whether `line` declares a destructor of class `base`: a `~base` token
/// whose next non-space character opens the parameter list.
fn has_destructor_of(line: &str, base: &str) -> bool {
    let needle = format!("~{base}");
    let mut start = 0;
    while let Some(pos) = line[start..].find(&needle) {
        let after = &line[start + pos + needle.len()..];
        if after.trim_start().starts_with('(') {
            return true;
        }
        start += pos + 1;
    }
    false
}

#[cfg(test)]
#[path = "classes_tests.rs"]
mod tests;
