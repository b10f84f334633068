use winch_asm::{Builder, Path, PathSegment};
use winch_msg::{
    BmpStatus, CodecError, Deserialize, DmxConfig, DmxPath, Message, MessageHeader, MessageType,
    Payload, PingRequest, PingResponse, Serialize, TargetList, WinchConfig, WinchMode, WinchPath,
    WinchStatus, WinchStatusFlags,
};

fn round_trip<T>(value: &T, expected_len: Option<usize>)
where
    T: Serialize + Deserialize + PartialEq + std::fmt::Debug,
{
    let bytes = value.to_bytes().unwrap();
    if let Some(len) = expected_len {
        assert_eq!(bytes.len(), len, "encoded size");
    }
    assert_eq!(&T::from_bytes(&bytes).unwrap(), value);
}

fn sample_path() -> Path {
    Path::new(vec![PathSegment::new(
        1,
        Builder::new().push(&[123.0]).build(),
    )])
}

#[test]
fn ping_request_round_trips() {
    round_trip(&PingRequest { ping_id: 123 }, Some(PingRequest::LEN));
}

#[test]
fn ping_response_round_trips() {
    round_trip(
        &PingResponse {
            ping_id: 123,
            device_time: 456,
        },
        Some(PingResponse::LEN),
    );
}

#[test]
fn target_list_round_trips() {
    round_trip(
        &TargetList {
            target_ids: vec![1, 2, 3],
        },
        Some(4),
    );
    round_trip(&TargetList::default(), Some(1));
}

#[test]
fn bmp_status_round_trips() {
    round_trip(
        &BmpStatus {
            device_time: 123,
            celsius: 5.1,
            pascals: 109_432.0,
        },
        Some(BmpStatus::LEN),
    );
}

#[test]
fn winch_status_round_trips() {
    let status = WinchStatus {
        device_time: 123,
        position: 4567,
        flags: (WinchStatusFlags::POSITION_KNOWN | WinchStatusFlags::LIMIT1).bits(),
    };
    round_trip(&status, Some(WinchStatus::LEN));
    assert!(status.status_flags().contains(WinchStatusFlags::LIMIT1));
    assert!(!status.status_flags().contains(WinchStatusFlags::LIMIT2));
}

#[test]
fn winch_config_round_trips() {
    round_trip(
        &WinchConfig {
            steps_per_rev: 800,
            ticks_per_rev: 1000,
            distance_per_rev: 150.0,
        },
        Some(WinchConfig::LEN),
    );
}

#[test]
fn dmx_config_round_trips() {
    round_trip(
        &DmxConfig {
            channel_offset: 10,
            channel_map: vec![0, 1, 2],
        },
        Some(5),
    );
}

#[test]
fn winch_path_round_trips() {
    round_trip(
        &WinchPath {
            mode: WinchMode::LinearPosition,
            path: sample_path(),
        },
        None,
    );
}

#[test]
fn dmx_path_round_trips() {
    round_trip(
        &DmxPath {
            path: sample_path(),
        },
        None,
    );
}

#[test]
fn unknown_winch_mode_is_rejected() {
    let encoded = WinchPath::default().to_bytes().unwrap();
    let mut tampered = encoded;
    tampered[0] = 9;
    assert_eq!(
        WinchPath::from_bytes(&tampered),
        Err(CodecError::UnknownDiscriminant(9))
    );
}

#[test]
fn truncated_path_payload_propagates_the_error() {
    // A header that promises more path bytes than are present must fail,
    // not decode an empty path.
    let bytes = WinchPath {
        mode: WinchMode::LinearVelocity,
        path: sample_path(),
    }
    .to_bytes()
    .unwrap();
    for cut in 0..bytes.len() {
        assert!(
            WinchPath::from_bytes(&bytes[..cut]).is_err(),
            "cut at {cut}"
        );
    }
}

#[test]
fn every_payload_frames_and_unframes() {
    let payloads = vec![
        Payload::None,
        Payload::PingRequest(PingRequest { ping_id: 7 }),
        Payload::PingResponse(PingResponse {
            ping_id: 7,
            device_time: 99,
        }),
        Payload::NotifyBmpStatus(BmpStatus {
            device_time: 5,
            celsius: 21.5,
            pascals: 101_325.0,
        }),
        Payload::NotifyWinchStatus(WinchStatus {
            device_time: 5,
            position: 10,
            flags: WinchStatusFlags::POSITION_KNOWN.bits(),
        }),
        Payload::GetWinchTargetsRequest,
        Payload::GetWinchTargetsResponse(TargetList {
            target_ids: vec![4, 5],
        }),
        Payload::GetWinchConfigRequest,
        Payload::GetWinchConfigResponse(WinchConfig::default()),
        Payload::SetWinchConfig(WinchConfig {
            steps_per_rev: 200,
            ticks_per_rev: 400,
            distance_per_rev: 0.25,
        }),
        Payload::SetWinchPath(WinchPath {
            mode: WinchMode::LinearVelocity,
            path: sample_path(),
        }),
        Payload::GetDmxTargetsRequest,
        Payload::GetDmxTargetsResponse(TargetList {
            target_ids: vec![9],
        }),
        Payload::GetDmxConfigRequest,
        Payload::GetDmxConfigResponse(DmxConfig::default()),
        Payload::SetDmxConfig(DmxConfig {
            channel_offset: 1,
            channel_map: vec![0, 2, 4],
        }),
        Payload::SetDmxPath(DmxPath {
            path: sample_path(),
        }),
    ];

    for payload in payloads {
        let message = Message::new(3, payload);
        let bytes = message.to_bytes().unwrap();

        let header = MessageHeader::from_bytes(&bytes).unwrap();
        assert_eq!(header.message_type, message.payload.message_type());
        assert_eq!(
            header.payload_size as usize,
            bytes.len() - MessageHeader::LEN
        );

        let decoded = Message::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, message);
    }
}

#[test]
fn oversize_payload_window_is_a_framing_error() {
    let message = Message::new(1, Payload::PingRequest(PingRequest { ping_id: 3 }));
    let mut bytes = message.to_bytes().unwrap();
    // Grow the declared window past the record.
    bytes[2] = 8;
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    assert_eq!(
        Message::from_bytes(&bytes),
        Err(CodecError::PayloadSizeMismatch {
            header: 8,
            payload: 4
        })
    );
}

#[test]
fn truncated_message_is_rejected() {
    let message = Message::new(1, Payload::PingResponse(PingResponse::default()));
    let bytes = message.to_bytes().unwrap();
    for cut in 0..bytes.len() {
        assert_eq!(
            Message::from_bytes(&bytes[..cut]),
            Err(CodecError::BufferTooShort),
            "cut at {cut}"
        );
    }
}

#[test]
fn unknown_message_tag_is_rejected() {
    let bytes = [1u8, 200, 0, 0];
    assert_eq!(
        Message::from_bytes(&bytes),
        Err(CodecError::UnknownPayloadType(200))
    );
}

#[test]
fn nonempty_window_on_an_empty_payload_is_a_framing_error() {
    let bytes = [1u8, u8::from(MessageType::GetWinchConfigRequest), 2, 0, 0xaa, 0xbb];
    assert_eq!(
        Message::from_bytes(&bytes),
        Err(CodecError::PayloadSizeMismatch {
            header: 2,
            payload: 0
        })
    );
}
