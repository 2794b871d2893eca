/// Built-in example questions, in match priority order
///
/// Earlier entries win when several share the typed prefix, so the shorter
/// "really into me?" question is offered before its "romantically" variant.
pub const DEFAULT_CATALOG: &[&str] = &[
    "How can I tell if they're really into me?",
    "Tips for a great first date?",
    "We've been arguing a lot - what can we do?",
    "How can I tell if they're really into me romantically?",
    "How do I talk about boundaries in relationships?",
    "What are the red flags that I should watch for?",
    "How to navigate the dating world with confidence?",
    "How to heal gently and grow stronger within yourself?",
    "How to deepen love and elevate romance in relationships?",
    "How to express yourself and understand better in communication?",
    "What should I do when we keep having the same arguments?",
    "How do I know if someone is genuinely interested in me?",
    "What are some conversation starters for first dates?",
    "How to maintain healthy boundaries while dating?",
    "Signs that someone is emotionally unavailable?",
    "How to build trust after a breakup?",
    "What to do when you feel like you're not ready to date?",
    "How to handle rejection gracefully?",
    "Tips for long-distance relationships?",
    "How to know when to end a relationship?",
];
