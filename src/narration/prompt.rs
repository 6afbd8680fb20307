//! Fixed instruction text sent ahead of every source file.

/// Instructions asking the narration service for full documentation of the
/// file that follows.
pub const DOCUMENTATION_TEMPLATE: &str = "\
Generate detailed documentation for the following code in English. The documentation should include the following elements:

1. Inline Comments
Provide clear and concise comments throughout the code.
Explain the purpose and logic of each line or block.
Highlight important considerations, such as performance implications, edge cases, or assumptions.
2. Function Documentation
For each function in the code, include:

Description: A concise explanation of what the function does.
Parameters:
List each parameter, specifying its name, type, and purpose.
Return Type:
Specify the return type and describe what the returned value represents.
Exceptions:
Mention any exceptions that the function might raise, including the conditions that trigger them.
Side Effects:
Note any changes the function makes to external states, like modifying global variables or I/O operations.
Example Usage:
Provide sample code demonstrating how to use the function, including expected input and output.
3. Class Documentation (if applicable)
For each class in the code, include:

Description: Briefly describe the class and its purpose.
Attributes:
Document each class attribute, specifying its type and purpose.
Methods:
List and document all methods within the class, following the function documentation format.
Example Usage:
Show how to instantiate and use the class.
4. Module-Level Documentation
Provide an overview of the module’s purpose and functionality.
Highlight how different functions, classes, or components within the module interact.
5. Best Practices and Optimization Notes
Include tips for using the code efficiently.
Mention any known limitations or potential improvements.
6. Testing Information
Outline how the code can be tested.
Mention any test cases or frameworks used, and provide examples if possible.
7. Additional Notes
Include any relevant information that enhances understanding, such as dependencies, related modules, or design decisions.";
