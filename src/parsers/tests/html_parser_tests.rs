use crate::parsers::html;

#[cfg(test)]
mod phone_tests {
    use super::*;

    #[test]
    fn test_tel_links() {
        let page = r#"<html><body>
            <a href="https://www.zomato.com/bangalore/abc/menu">Menu</a>
            <a href="tel:+919876543210">+91 98765 43210</a>
            <a href="tel: +91 80 4112 3456 ">Landline</a>
        </body></html>"#;
        assert_eq!(
            html::phone_numbers(page),
            vec!["+919876543210", "+91 80 4112 3456"]
        );
    }

    #[test]
    fn test_duplicates_are_removed() {
        let page = r#"<body>
            <a href="tel:+919876543210">Call</a>
            <a href="tel:+919876543210">Call again</a>
        </body>"#;
        assert_eq!(html::phone_numbers(page), vec!["+919876543210"]);
    }

    #[test]
    fn test_encoded_spaces_and_upper_case_scheme() {
        let page = r#"<a href="TEL:080%204112%203456">Call</a>"#;
        assert_eq!(html::phone_numbers(page), vec!["080 4112 3456"]);
    }

    #[test]
    fn test_empty_or_missing_numbers() {
        assert!(html::phone_numbers("").is_empty());
        assert!(html::phone_numbers(r#"<a href="tel:">Call</a>"#).is_empty());
        assert!(html::phone_numbers(r#"<a href="mailto:a@b.c">Mail</a>"#).is_empty());
        assert!(html::phone_numbers("<p>+91 98765 43210</p>").is_empty());
    }
}
