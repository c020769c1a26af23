use std::collections::HashMap;
use std::fmt;

use itertools::Itertools;

use super::atom::Atom;

pub const OBJECT_NAME: &str = "object-name";

/// A node in the expression tree: a head atom, an ordered tail of child
/// expressions, and a property map used to tag plottable values.
///
/// Equality compares head and tail recursively. Properties are metadata and
/// never take part in equality.
#[derive(Debug, Clone, Default)]
pub struct Expression {
    head: Atom,
    tail: Vec<Expression>,
    properties: HashMap<String, Expression>,
}

impl Expression {
    /// Leaf expression holding a single atom.
    pub fn new(head: Atom) -> Self {
        Expression {
            head,
            tail: Vec::new(),
            properties: HashMap::new(),
        }
    }

    pub fn with_tail(head: Atom, tail: Vec<Expression>) -> Self {
        Expression {
            head,
            tail,
            properties: HashMap::new(),
        }
    }

    /// `List`-tagged expression over the given items.
    pub fn list(items: Vec<Expression>) -> Self {
        Expression::with_tail(Atom::List, items)
    }

    /// Procedure value: `Lambda`-tagged `[params, body]`.
    pub fn lambda(params: Expression, body: Expression) -> Self {
        Expression::with_tail(Atom::Lambda, vec![params, body])
    }

    pub fn number(value: f64) -> Self {
        Expression::new(Atom::Number(value))
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Expression::new(Atom::symbol(name))
    }

    pub fn string(text: impl Into<String>) -> Self {
        Expression::new(Atom::string(text))
    }

    pub fn head(&self) -> &Atom {
        &self.head
    }

    pub fn tail(&self) -> &[Expression] {
        &self.tail
    }

    /// Append a child to the tail.
    pub fn append(&mut self, child: Expression) {
        self.tail.push(child);
    }

    pub fn is_head_complex(&self) -> bool {
        self.head.is_complex()
    }

    pub fn is_head_symbol(&self) -> bool {
        self.head.is_symbol()
    }

    pub fn is_head_list(&self) -> bool {
        self.head.is_list()
    }

    pub fn is_head_lambda(&self) -> bool {
        self.head.is_lambda()
    }

    pub fn is_head_discrete(&self) -> bool {
        self.head.is_discrete()
    }

    pub fn is_none(&self) -> bool {
        self.head.is_none() && self.tail.is_empty()
    }

    /// A leaf whose head is a symbol.
    pub fn is_bare_symbol(&self) -> bool {
        self.tail.is_empty() && self.head.is_symbol()
    }

    pub fn properties(&self) -> &HashMap<String, Expression> {
        &self.properties
    }

    /// Insert or overwrite a property.
    pub fn set_property(&mut self, key: impl Into<String>, value: Expression) {
        self.properties.insert(key.into(), value);
    }

    /// Builder form of [`Expression::set_property`].
    pub fn with_property(mut self, key: impl Into<String>, value: Expression) -> Self {
        self.set_property(key, value);
        self
    }

    /// Property value, or a `None` expression when the key is absent.
    pub fn get_property(&self, key: &str) -> Expression {
        self.properties.get(key).cloned().unwrap_or_default()
    }

    fn object_name_is(&self, name: &str) -> bool {
        self.properties
            .get(OBJECT_NAME)
            .and_then(|value| value.head.as_str())
            .is_some_and(|value| value == name)
    }

    pub fn is_point(&self) -> bool {
        self.object_name_is("point")
    }

    pub fn is_line(&self) -> bool {
        self.object_name_is("line")
    }

    pub fn is_text(&self) -> bool {
        self.object_name_is("text")
    }

    fn coordinate(&self, index: usize) -> f64 {
        self.tail
            .get(index)
            .map(|child| child.head.as_number())
            .unwrap_or(0.0)
    }

    fn endpoint(&self, index: usize) -> Option<&Expression> {
        self.tail.get(index)
    }

    pub fn point_tail0(&self) -> f64 {
        self.coordinate(0)
    }

    pub fn point_tail1(&self) -> f64 {
        self.coordinate(1)
    }

    pub fn line_tail0x(&self) -> f64 {
        self.endpoint(0).map_or(0.0, |p| p.coordinate(0))
    }

    pub fn line_tail0y(&self) -> f64 {
        self.endpoint(0).map_or(0.0, |p| p.coordinate(1))
    }

    pub fn line_tail1x(&self) -> f64 {
        self.endpoint(1).map_or(0.0, |p| p.coordinate(0))
    }

    pub fn line_tail1y(&self) -> f64 {
        self.endpoint(1).map_or(0.0, |p| p.coordinate(1))
    }

    /// The numeric rendering requirement of a graphic: `size` for points,
    /// `thickness` for lines, `text-scale` for text. 0 when absent.
    pub fn req(&self) -> f64 {
        let key = if self.is_point() {
            "size"
        } else if self.is_line() {
            "thickness"
        } else if self.is_text() {
            "text-scale"
        } else {
            return 0.0;
        };
        self.get_property(key).head.as_number()
    }

    /// Position of a text graphic (a point expression).
    pub fn text_req(&self) -> Expression {
        self.get_property("position")
    }

    /// Rotation of a text graphic in radians.
    pub fn text_rot_req(&self) -> f64 {
        self.get_property("text-rotation").head.as_number()
    }

    /// Canonical text form handed to renderers and REPL output.
    pub fn transfer_string(&self) -> String {
        self.to_string()
    }
}

impl From<Atom> for Expression {
    fn from(atom: Atom) -> Self {
        Expression::new(atom)
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.head == other.head && self.tail == other.tail
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.head.is_none() {
            return write!(f, "NONE");
        }
        if let Atom::Complex(_) = self.head {
            if self.tail.is_empty() {
                return write!(f, "{}", self.head);
            }
        }

        let head = self.head.to_string();
        let separator = if head.is_empty() || self.tail.is_empty() {
            ""
        } else {
            " "
        };
        write!(
            f,
            "({}{}{})",
            head,
            separator,
            self.tail.iter().map(|child| child.to_string()).join(" ")
        )
    }
}
