//! Prompt assembly.
//!
//! Pure templating, no conditional logic beyond substituting the empty
//! string for an absent package name. The "output ONLY ... wrap in a
//! fenced block" instructions are load-bearing: the extractor depends on
//! the generator obeying them. Best-effort contract, not an enforced one.

use crate::domain::models::GenerationTarget;

/// Prompt for the per-iteration primary fix round.
pub fn primary_fix_prompt(
    target: &GenerationTarget,
    test_source: &str,
    build_output: &str,
) -> String {
    format!(
        "You are an AI Java TDD assistant.\n\
         \n\
         The user wants you to work ONLY on the following class:\n\
         {class}\n\
         \n\
         This class MUST be placed in the following package (if not empty):\n\
         {package}\n\
         \n\
         If the class does not exist yet, create it.\n\
         If it already exists, rewrite the entire file.\n\
         \n\
         Specification / intended behavior:\n\
         {specification}\n\
         \n\
         Here is the full JUnit test class that must pass:\n\
         {test_source}\n\
         \n\
         Below is the JUnit test output showing the failures.\n\
         Your task:\n\
         - Produce the FULL Java source code for the class.\n\
         - The class MUST start with the correct package declaration if provided.\n\
         - Modify ONLY the specified class.\n\
         - Ensure the logic satisfies the specification and the tests.\n\
         - Do NOT create or modify any other files.\n\
         - Do NOT include explanations, comments, or prose.\n\
         - Output ONLY the Java source code.\n\
         - Wrap the code in a single ```java ... ``` block.\n\
         \n\
         Test output:\n\
         {build_output}\n",
        class = target.class_name,
        package = target.package_or_empty(),
        specification = target.specification,
    )
}

/// Prompt for the one-time escalation to the fallback model.
pub fn fallback_fix_prompt(
    target: &GenerationTarget,
    test_source: &str,
    build_output: &str,
) -> String {
    format!(
        "You are a high-reasoning Java expert.\n\
         \n\
         The smaller model failed to fix the class within its iteration budget.\n\
         Now you must produce a fully correct solution.\n\
         \n\
         The user wants you to work ONLY on the following class:\n\
         {class}\n\
         \n\
         This class MUST be placed in the following package (if not empty):\n\
         {package}\n\
         \n\
         If the class does not exist yet, create it.\n\
         If it already exists, rewrite the entire file.\n\
         \n\
         Specification / intended behavior:\n\
         {specification}\n\
         \n\
         Here is the full JUnit test class that must pass:\n\
         {test_source}\n\
         \n\
         Below is the JUnit test output showing the failures.\n\
         Your task:\n\
         - Carefully analyze the specification, the test class, and the test failures.\n\
         - Produce the FULL Java source code for the class.\n\
         - The class MUST start with the correct package declaration if provided.\n\
         - Modify ONLY the specified class.\n\
         - Ensure the logic is complete and all tests pass.\n\
         - Do NOT create or modify any other files.\n\
         - Do NOT include explanations, comments, or prose.\n\
         - Output ONLY the Java source code.\n\
         - Wrap the code in a single ```java ... ``` block.\n\
         \n\
         Test output:\n\
         {build_output}\n",
        class = target.class_name,
        package = target.package_or_empty(),
        specification = target.specification,
    )
}

/// Prompt for the manifest-fix round on dependency resolution failures.
pub fn manifest_fix_prompt(build_output: &str) -> String {
    format!(
        "You are an AI Maven dependency expert.\n\
         \n\
         The Java code failed to compile due to missing dependencies.\n\
         \n\
         Your task:\n\
         - Analyze the test output.\n\
         - Produce ONLY the <dependency> entries that must be added to pom.xml.\n\
         - Do NOT output the full pom.xml.\n\
         - Do NOT include explanations or comments.\n\
         - Output ONLY a single ```xml ... ``` block containing one or more <dependency> elements.\n\
         \n\
         Test output:\n\
         {build_output}\n"
    )
}
