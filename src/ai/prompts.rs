/// Instructions sent with every form image. `{filename}` is replaced per file.
pub const FORM_EXTRACTION_PROMPT: &str = r#"
Parse the information in the form represented by the attached image and return the results as a JSON object.
The form contains the following fields which should be mapped to the corresponding keys in the JSON object:
    First Name -> first_name
    Last Name -> last_name
    Email -> email
    Mobile -> mobile
    Address -> address
    City -> city
    State -> state
    Zip -> zip
    Newsletter -> newsletter
    Free Seminar Invitations -> free_seminar_invitations
    Consultation Appointment -> consultation_appointment
    Speaker for my group -> speaker_for_my_group

The newsletter, free_seminar_invitations, consultation_appointment, and speaker_for_my_group fields are checkboxes on the form.
If the field is checked, use a value of true and if not, use a value of false.

Also include a field called 'image' which contains the name of the image file and a field called 'confidence'
which contains the confidence score of the extracted information. You may use whatever method you prefer to
define the confidence score so long as a low score indicates low confidence in the extracted information.

If information is blank for a form field value, use an empty string for the value. If information is not blank
but is not legible, use "ERROR" as the value.

The image file name is {filename}. Please extract the information from this image and return it as a JSON object.
"#;

/// Build the user prompt for one form image
pub fn build_extraction_prompt(filename: &str) -> String {
    FORM_EXTRACTION_PROMPT.replace("{filename}", filename)
}
