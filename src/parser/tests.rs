//! Tests for the request parser.

#[cfg(test)]
mod tests {
    use crate::parser::{
        content_length, extract_boundary, find_header_end, header_value, locate_payload,
        parse_request, sanitize_path, Error, Method, MultipartError,
    };

    #[test]
    fn test_parse_simple_get_request() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method, "GET");
        assert_eq!(result.method().unwrap(), Method::GET);
        assert_eq!(result.target, "/index.html");
        assert_eq!(result.version, "HTTP/1.1");
        assert_eq!(result.content_length, None);
        assert_eq!(result.body_offset, None);
    }

    #[test]
    fn test_parse_post_with_body_offset() {
        let request = b"POST /upload HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method().unwrap(), Method::POST);
        assert_eq!(result.content_length, Some(5));
        assert_eq!(result.declared_length(), 5);

        let offset = result.body_offset.unwrap();
        assert_eq!(&request[offset..], b"hello");
    }

    #[test]
    fn test_zero_content_length_has_no_body_offset() {
        let request = b"POST /upload HTTP/1.1\r\nContent-Length: 0\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.content_length, Some(0));
        assert_eq!(result.body_offset, None);
    }

    #[test]
    fn test_positive_length_without_terminator_has_no_body_offset() {
        let request = b"POST /upload HTTP/1.1\r\nContent-Length: 10\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.content_length, Some(10));
        assert_eq!(result.body_offset, None);
    }

    #[test]
    fn test_missing_tokens_are_malformed() {
        for request in [
            &b""[..],
            b"\r\n\r\n",
            b"GET\r\n\r\n",
            b"GET /index.html\r\nHost: x\r\n\r\n",
        ] {
            let result = parse_request(request);
            assert!(
                matches!(result, Err(Error::MalformedRequestLine(_))),
                "expected malformed for {:?}",
                String::from_utf8_lossy(request)
            );
        }
    }

    #[test]
    fn test_protocol_token_is_not_validated() {
        let result = parse_request(b"GET / FOO/9\r\n\r\n").unwrap();
        assert_eq!(result.version, "FOO/9");
    }

    #[test]
    fn test_unknown_method_still_parses() {
        let result = parse_request(b"BREW /pot HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(result.method, "BREW");
        assert!(matches!(result.method(), Err(Error::InvalidMethod(ref m)) if m == "BREW"));
    }

    #[test]
    fn test_method_round_trip_display() {
        for name in ["GET", "POST"] {
            let method: Method = name.parse().unwrap();
            assert_eq!(method.to_string(), name);
            assert_eq!(method.as_str(), name);
        }
    }

    #[test]
    fn test_only_get_and_post_are_recognised() {
        for name in ["get", "PUT", "DELETE", "HEAD", "OPTIONS", "PATCH"] {
            let result = name.parse::<Method>();
            assert!(
                matches!(result, Err(Error::InvalidMethod(ref m)) if m == name),
                "expected {name} to be rejected"
            );
        }
    }

    #[test]
    fn test_request_line_tabs_are_not_separators() {
        let result = parse_request(b"GET\t/\tHTTP/1.1\r\n\r\n");
        assert!(matches!(result, Err(Error::MalformedRequestLine(_))));
    }

    #[test]
    fn test_request_line_repeated_spaces() {
        let result = parse_request(b"POST  /drop   HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(result.method, "POST");
        assert_eq!(result.target, "/drop");
        assert_eq!(result.version, "HTTP/1.0");
    }

    #[test]
    fn test_protocol_runs_to_end_of_line() {
        let result = parse_request(b"GET /a.css HTTP/1.1 extra\r\nHost: x\r\n\r\n").unwrap();
        assert_eq!(result.target, "/a.css");
        assert_eq!(result.version, "HTTP/1.1 extra");
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = b"POST / HTTP/1.1\r\ncontent-type: text/plain\r\nCONTENT-LENGTH: 12\r\n\r\n";
        assert_eq!(header_value(request, "Content-Type"), Some("text/plain".to_string()));
        assert_eq!(content_length(request), Some(12));
    }

    #[test]
    fn test_header_lookup_ignores_body() {
        let request = b"POST / HTTP/1.1\r\nHost: x\r\n\r\nContent-Length: 99\r\n";
        assert_eq!(content_length(request), None);
    }

    #[test]
    fn test_unparsable_content_length() {
        let request = b"POST / HTTP/1.1\r\nContent-Length: lots\r\n\r\n";
        assert_eq!(content_length(request), None);
        assert_eq!(parse_request(request).unwrap().declared_length(), 0);
    }

    #[test]
    fn test_find_header_end() {
        assert_eq!(find_header_end(b"GET / HTTP/1.1\r\n\r\nbody"), Some(18));
        assert_eq!(find_header_end(b"GET / HTTP/1.1\r\n"), None);
        assert_eq!(find_header_end(b""), None);
    }

    #[test]
    fn test_sanitize_root_maps_to_default_document() {
        assert_eq!(sanitize_path("/").unwrap(), sanitize_path("/index.html").unwrap());
    }

    #[test]
    fn test_sanitize_strips_leading_slashes() {
        assert_eq!(sanitize_path("/img/cat.png").unwrap().as_str(), "img/cat.png");
        assert_eq!(sanitize_path("//etc/passwd").unwrap().as_str(), "etc/passwd");
    }

    #[test]
    fn test_sanitize_rejects_dot_dot_anywhere() {
        for target in ["/../etc/passwd", "/a/../b", "/..", "/notes..txt", "/a/b/.."] {
            assert!(
                matches!(sanitize_path(target), Err(Error::PathTraversal(ref t)) if t == target),
                "expected rejection for {target}"
            );
        }
    }

    #[test]
    fn test_extract_boundary() {
        let content_type = "multipart/form-data; boundary=----WebKitFormBoundary7MA4YWxk";
        assert_eq!(
            extract_boundary(content_type).unwrap(),
            "----WebKitFormBoundary7MA4YWxk"
        );
    }

    #[test]
    fn test_extract_boundary_failures() {
        assert_eq!(
            extract_boundary("multipart/mixed; boundary=abc"),
            Err(MultipartError::NotFormData)
        );
        assert_eq!(
            extract_boundary("multipart/form-data"),
            Err(MultipartError::MissingBoundary)
        );
        assert_eq!(
            extract_boundary("multipart/form-data; boundary="),
            Err(MultipartError::MissingBoundary)
        );
    }

    #[test]
    fn test_locate_payload() {
        let body = b"--XYZ\r\n\
            Content-Disposition: form-data; name=\"file\"; filename=\"a.bin\"\r\n\
            Content-Type: application/octet-stream\r\n\r\n\
            \x00\x01payload\r\n\x02\r\n--XYZ--\r\n";
        let range = locate_payload(body, "XYZ").unwrap();
        assert_eq!(&body[range], b"\x00\x01payload\r\n\x02");
    }

    #[test]
    fn test_locate_empty_payload() {
        let body = b"--XYZ\r\nContent-Disposition: form-data; name=\"f\"\r\n\r\n\r\n--XYZ--\r\n";
        let range = locate_payload(body, "XYZ").unwrap();
        assert!(range.is_empty());
    }

    #[test]
    fn test_locate_payload_failures() {
        assert_eq!(
            locate_payload(b"--XYZ\r\nContent-Disposition: form-data", "XYZ"),
            Err(MultipartError::MissingPartHeaders)
        );
        assert_eq!(
            locate_payload(b"--XYZ\r\nContent-Disposition: form-data\r\n\r\ndata with no end", "XYZ"),
            Err(MultipartError::MissingClosingBoundary)
        );
    }

    #[test]
    fn test_multipart_error_converts_to_parser_error() {
        let err: Error = MultipartError::MissingBoundary.into();
        assert_eq!(
            err.to_string(),
            "Malformed multipart body: Missing boundary in Content-Type"
        );
    }
}
