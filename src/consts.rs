// Well-known class names the evaluator compares against.

pub const JAVA_LANG_OBJECT: &str = "java.lang.Object";
pub const JAVA_LANG_STRING: &str = "java.lang.String";

// Wrapper classes paired with the primitive they box, in JLS order.
pub const WRAPPER_CLASSES: &[(&str, &str)] = &[
    ("java.lang.Boolean", "boolean"),
    ("java.lang.Byte", "byte"),
    ("java.lang.Short", "short"),
    ("java.lang.Integer", "int"),
    ("java.lang.Long", "long"),
    ("java.lang.Float", "float"),
    ("java.lang.Double", "double"),
    ("java.lang.Character", "char"),
];
